//! Tenant context and roles

use serde::{Deserialize, Serialize};

/// Role of an authenticated user or an employee record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Developer,
    Supervisor,
    Caregiver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Developer => "developer",
            Role::Supervisor => "supervisor",
            Role::Caregiver => "caregiver",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "developer" => Some(Role::Developer),
            "supervisor" => Some(Role::Supervisor),
            "caregiver" => Some(Role::Caregiver),
            _ => None,
        }
    }

    pub fn can_delete(&self) -> bool {
        matches!(self, Role::Admin | Role::Developer | Role::Supervisor)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Caregiver
    }
}

/// Who is signed in and which tenant namespace their session writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantContext {
    pub username: String,
    pub tenant_id: String,
    pub role: Role,
    pub display_name: String,
}

impl TenantContext {
    pub fn new(
        username: impl Into<String>,
        tenant_id: impl Into<String>,
        role: Role,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            tenant_id: tenant_id.into(),
            role,
            display_name: display_name.into(),
        }
    }
}
