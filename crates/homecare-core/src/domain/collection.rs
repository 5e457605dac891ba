//! Named collections of the tenant namespace

use serde::{Deserialize, Serialize};

use homecare_shared::constants::TENANTS_ROOT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Clients,
    CareActions,
    ScheduledTasks,
    Employees,
    CareTasks,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Clients,
        Collection::CareActions,
        Collection::ScheduledTasks,
        Collection::Employees,
        Collection::CareTasks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Clients => "clients",
            Collection::CareActions => "careActions",
            Collection::ScheduledTasks => "scheduledTasks",
            Collection::Employees => "employees",
            Collection::CareTasks => "careTasks",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// `tenants/{tenant_id}/{collection}`
    pub fn path(&self, tenant_id: &str) -> String {
        format!("{}/{}/{}", TENANTS_ROOT, tenant_id, self.as_str())
    }

    /// `tenants/{tenant_id}/{collection}/{id}`
    pub fn record_path(&self, tenant_id: &str, id: &str) -> String {
        format!("{}/{}", self.path(tenant_id), id)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Collection::Clients.path("Jess"), "tenants/Jess/clients");
        assert_eq!(
            Collection::CareActions.record_path("Jess", "abc"),
            "tenants/Jess/careActions/abc"
        );
        assert_eq!(Collection::from_str("scheduledTasks"), Some(Collection::ScheduledTasks));
        assert_eq!(Collection::from_str("tasks"), None);
    }
}
