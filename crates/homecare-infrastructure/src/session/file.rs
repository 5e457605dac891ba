//! Session fields kept in a small JSON file

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use homecare_core::repositories::{PersistedSession, SessionStorage};
use homecare_core::DomainError;

use crate::error::InfraError;

pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<PersistedSession, DomainError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PersistedSession::default()),
            Err(e) => return Err(InfraError::io(self.display(), e).into_session_error()),
        };
        serde_json::from_str(&raw).map_err(|e| InfraError::json(self.display(), e).into_session_error())
    }

    fn save(&self, session: &PersistedSession) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| InfraError::io(self.display(), e).into_session_error())?;
        }
        let body = serde_json::to_vec_pretty(session)
            .map_err(|e| InfraError::json(self.display(), e).into_session_error())?;
        fs::write(&self.path, body).map_err(|e| InfraError::io(self.display(), e).into_session_error())?;
        debug!("Session saved to {}", self.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), DomainError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(InfraError::io(self.display(), e).into_session_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join(".homecare").join("session.json"));
        assert_eq!(storage.load().unwrap(), PersistedSession::default());

        let session = PersistedSession {
            user: Some("Jess".into()),
            tenant: Some("Jess".into()),
            role: Some("admin".into()),
            display_name: Some("Jess - HomeCare Admin".into()),
        };
        storage.save(&session).unwrap();
        assert_eq!(storage.load().unwrap(), session);

        let raw = fs::read_to_string(storage.path()).unwrap();
        assert!(raw.contains("\"displayName\""));

        storage.clear().unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), PersistedSession::default());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "[1,").unwrap();
        let err = FileSessionStorage::new(path).load().unwrap_err();
        assert!(matches!(err, DomainError::SessionStorageError(_)));
    }
}
