//! Repository traits (ports)

pub mod tenant_store;
pub mod credential_provider;
pub mod session_storage;

pub use tenant_store::{validate_segment, Record, Snapshot, SnapshotStream, TenantStore};
pub use credential_provider::CredentialProvider;
pub use session_storage::{PersistedSession, SessionStorage};

#[cfg(test)]
pub use tenant_store::MockTenantStore;
