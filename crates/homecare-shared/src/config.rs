//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_PUBSUB_CAPACITY, DEFAULT_SESSION_FILE};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub store: StoreSettings,
    pub session: SessionSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    /// JSON file mirroring the whole tenant namespace; in-memory only when unset.
    #[serde(default)]
    pub snapshot_path: Option<String>,
    pub pubsub_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub storage_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    /// Directory for the daily rolling log file; stderr only when unset.
    #[serde(default)]
    pub dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &env)
    }

    /// Same layering as [`AppConfig::load`] but reading files from `dir`.
    /// `HOMECARE_*` variables still override the files.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, ConfigError> {
        Self::builder(dir, env)?.build()?.try_deserialize()
    }

    fn builder(
        dir: &str,
        env: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("app.env", env)?
            .set_default("app.name", "homecare")?
            .set_default("store.pubsub_capacity", DEFAULT_PUBSUB_CAPACITY as i64)?
            .set_default("session.storage_path", DEFAULT_SESSION_FILE)?
            .set_default("log.level", DEFAULT_LOG_LEVEL)?
            .add_source(File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(File::with_name(&format!("{}/{}", dir, env)).required(false))
            .add_source(
                Environment::with_prefix("HOMECARE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(dir.path().to_str().unwrap(), "test").unwrap();

        assert_eq!(cfg.app.env, "test");
        assert_eq!(cfg.store.pubsub_capacity, DEFAULT_PUBSUB_CAPACITY);
        assert_eq!(cfg.session.storage_path, DEFAULT_SESSION_FILE);
        assert!(cfg.store.snapshot_path.is_none());
        assert!(cfg.log.dir.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("default.toml")).unwrap();
        writeln!(f, "[store]\nsnapshot_path = \"/tmp/homecare.json\"\npubsub_capacity = 16").unwrap();

        let cfg = AppConfig::load_from(dir.path().to_str().unwrap(), "test").unwrap();
        assert_eq!(cfg.store.snapshot_path.as_deref(), Some("/tmp/homecare.json"));
        assert_eq!(cfg.store.pubsub_capacity, 16);
    }

    #[test]
    fn test_env_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("default.toml")).unwrap();
        writeln!(f, "[app]\nname = \"from-file\"").unwrap();

        std::env::set_var("HOMECARE_APP__NAME", "from-env");
        let cfg = AppConfig::load_from(dir.path().to_str().unwrap(), "test");
        std::env::remove_var("HOMECARE_APP__NAME");

        assert_eq!(cfg.unwrap().app.name, "from-env");
    }
}
