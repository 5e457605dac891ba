//! # HomeCare Infrastructure
//! 
//! Store, credential and session storage implementations (adapters).

pub mod store;
pub mod credentials;
pub mod session;
pub mod error;

pub use store::{MemoryTenantStore, StoreMetrics, StoreOptions};
pub use credentials::{LegacyHashCredentials, StaticCredentialTable, StaticUser};
pub use session::{FileSessionStorage, MemorySessionStorage};
pub use error::InfraError;
