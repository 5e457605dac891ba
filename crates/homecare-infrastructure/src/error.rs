//! Adapter-level I/O errors, mapped onto domain errors at the port boundary

use thiserror::Error;

use homecare_core::DomainError;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl InfraError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        InfraError::Io { path: path.into(), source }
    }

    pub fn json(path: impl Into<String>, source: serde_json::Error) -> Self {
        InfraError::Json { path: path.into(), source }
    }

    pub fn into_store_error(self) -> DomainError {
        DomainError::StoreError(self.to_string())
    }

    pub fn into_session_error(self) -> DomainError {
        DomainError::SessionStorageError(self.to_string())
    }
}
