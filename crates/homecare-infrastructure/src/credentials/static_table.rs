// ============================================================================
// HomeCare Infrastructure - Static Credential Table
// File: crates/homecare-infrastructure/src/credentials/static_table.rs
// Description: Fixed user table with cleartext passwords
// ============================================================================

use async_trait::async_trait;
use tracing::warn;

use homecare_core::repositories::CredentialProvider;
use homecare_core::{DomainError, Role, TenantContext};

#[derive(Debug, Clone)]
pub struct StaticUser {
    pub username: String,
    pub password: String,
    pub tenant_id: String,
    pub role: Role,
    pub display_name: String,
}

impl StaticUser {
    pub fn new(username: &str, password: &str, tenant_id: &str, role: Role, display_name: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            tenant_id: tenant_id.to_string(),
            role,
            display_name: display_name.to_string(),
        }
    }

    fn context(&self) -> TenantContext {
        TenantContext::new(&self.username, &self.tenant_id, self.role, &self.display_name)
    }
}

/// Exact, case-sensitive match on username and password.
pub struct StaticCredentialTable {
    users: Vec<StaticUser>,
}

impl StaticCredentialTable {
    pub fn new(users: Vec<StaticUser>) -> Self {
        Self { users }
    }

    /// The two accounts shipped with the application.
    pub fn predefined() -> Self {
        Self::new(vec![
            StaticUser::new("Jess", "JessCard2025!", "Jess", Role::Admin, "Jess - HomeCare Admin"),
            StaticUser::new("GBTech", "1q2w3e!Q@W#E", "GBTech", Role::Developer, "GBTech - Developer"),
        ])
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialTable {
    async fn validate(&self, username: &str, password: &str) -> Result<TenantContext, DomainError> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .map(StaticUser::context)
            .ok_or_else(|| {
                warn!("Credential check failed for: {}", username);
                DomainError::InvalidCredentials
            })
    }
}
