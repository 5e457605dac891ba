//! In-process tenant store

pub mod kv;
pub mod bus;
pub mod metrics;
pub mod persist;
pub mod memory;

pub use kv::RecordKv;
pub use bus::SnapshotBus;
pub use metrics::StoreMetrics;
pub use persist::SnapshotFile;
pub use memory::{MemoryTenantStore, StoreOptions};
