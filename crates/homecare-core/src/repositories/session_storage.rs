//! Durable client-side session storage (port)

use serde::{Deserialize, Serialize};

use crate::domain::{Role, TenantContext};
use crate::error::DomainError;

/// Session fields persisted across restarts under the keys `user`,
/// `tenant`, `role` and `displayName`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl PersistedSession {
    /// Restorable only when both user and tenant are present. Role falls back
    /// to caregiver, display name to the username.
    pub fn to_context(&self) -> Option<TenantContext> {
        let user = self.user.as_deref().filter(|u| !u.is_empty())?;
        let tenant = self.tenant.as_deref().filter(|t| !t.is_empty())?;
        let role = self
            .role
            .as_deref()
            .and_then(Role::from_str)
            .unwrap_or_default();
        let display_name = self
            .display_name
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| user.to_string());
        Some(TenantContext::new(user, tenant, role, display_name))
    }
}

impl From<&TenantContext> for PersistedSession {
    fn from(ctx: &TenantContext) -> Self {
        Self {
            user: Some(ctx.username.clone()),
            tenant: Some(ctx.tenant_id.clone()),
            role: Some(ctx.role.as_str().to_string()),
            display_name: Some(ctx.display_name.clone()),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<PersistedSession, DomainError>;
    fn save(&self, session: &PersistedSession) -> Result<(), DomainError>;
    fn clear(&self) -> Result<(), DomainError>;
}
