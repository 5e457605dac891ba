//! Credential provider trait (port)

use async_trait::async_trait;

use crate::domain::TenantContext;
use crate::error::DomainError;

/// Turns a username/password pair into the tenant context of the session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn validate(&self, username: &str, password: &str) -> Result<TenantContext, DomainError>;
}
