//! Application-wide constants

pub const TENANTS_ROOT: &str = "tenants";
pub const DEFAULT_PUBSUB_CAPACITY: usize = 256;
pub const DEFAULT_SESSION_FILE: &str = ".homecare/session.json";
pub const DEFAULT_STORE_FILE: &str = ".homecare/store.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_FILE_PREFIX: &str = "homecare.log";
pub const UNKNOWN_CLIENT_NAME: &str = "Unknown Client";
pub const RECENT_ACTIONS_LIMIT: usize = 5;
pub const ID_RANDOM_SUFFIX_LEN: usize = 11;
