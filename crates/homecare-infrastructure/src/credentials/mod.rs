//! Credential providers

pub mod static_table;
pub mod legacy_hash;

pub use static_table::{StaticCredentialTable, StaticUser};
pub use legacy_hash::LegacyHashCredentials;
