//! JSON mirror of the whole store, rewritten atomically

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use homecare_core::repositories::Record;

use crate::error::InfraError;

/// Callers serialize `save`; the temp file name is fixed.
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Empty map when the file does not exist yet.
    pub fn load(&self) -> Result<BTreeMap<String, Record>, InfraError> {
        let shown = self.path.display().to_string();
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(InfraError::io(shown, e)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| InfraError::json(shown, e))
    }

    /// Write to a sibling temp file, then rename over the target.
    pub fn save(&self, entries: &BTreeMap<String, Record>) -> Result<(), InfraError> {
        let shown = self.path.display().to_string();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| InfraError::io(shown.clone(), e))?;
        }

        let body = serde_json::to_vec_pretty(entries).map_err(|e| InfraError::json(shown.clone(), e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|e| InfraError::io(tmp.display().to_string(), e))?;
        fs::rename(&tmp, &self.path).map_err(|e| InfraError::io(shown.clone(), e))?;

        debug!("Persisted {} records to {}", entries.len(), shown);
        Ok(())
    }
}
