//! Domain errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    // Validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid store path: {0}")]
    InvalidPath(String),

    // Auth
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // Remote I/O
    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Session storage error: {0}")]
    SessionStorageError(String),

    #[error("{collection} record not found: {id}")]
    RecordNotFound { collection: String, id: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Care action {action_id} saved but scheduled task was not removed: {reason}")]
    CompletionIncomplete { action_id: String, reason: String },
}

impl DomainError {
    /// Remote failures a caller may surface as a short-lived notice and
    /// re-trigger by hand.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::StoreError(_)
                | DomainError::SessionStorageError(_)
                | DomainError::CompletionIncomplete { .. }
        )
    }

    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidCredentials | DomainError::NotAuthenticated | DomainError::PermissionDenied(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::ValidationError(_) | DomainError::InvalidPath(_))
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SerializationError(e.to_string())
    }
}
