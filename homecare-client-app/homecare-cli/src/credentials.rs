use async_trait::async_trait;

use homecare_core::repositories::CredentialProvider;
use homecare_core::{DomainError, TenantContext};
use homecare_infrastructure::{LegacyHashCredentials, StaticCredentialTable};

/// Credential provider picked at startup.
pub enum LoginProvider {
    Static(StaticCredentialTable),
    Legacy(LegacyHashCredentials),
}

impl LoginProvider {
    pub fn select(legacy: bool) -> Self {
        if legacy {
            LoginProvider::Legacy(LegacyHashCredentials::new())
        } else {
            LoginProvider::Static(StaticCredentialTable::predefined())
        }
    }
}

#[async_trait]
impl CredentialProvider for LoginProvider {
    async fn validate(&self, username: &str, password: &str) -> Result<TenantContext, DomainError> {
        match self {
            LoginProvider::Static(table) => table.validate(username, password).await,
            LoginProvider::Legacy(legacy) => legacy.validate(username, password).await,
        }
    }
}
