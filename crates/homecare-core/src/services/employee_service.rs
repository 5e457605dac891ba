//! Employee records of the signed-in tenant

use chrono::Utc;
use tracing::info;

use crate::domain::{Employee, EmployeeDraft};
use crate::error::DomainError;

use super::scope::TenantCollection;

pub struct EmployeeService {
    records: TenantCollection<Employee>,
}

impl EmployeeService {
    pub fn new(records: TenantCollection<Employee>) -> Self {
        Self { records }
    }

    pub async fn save(&self, draft: EmployeeDraft) -> Result<Employee, DomainError> {
        let actor = self.records.actor()?;
        let employee = draft.into_employee(&actor, Utc::now())?;

        self.records.put(&employee).await?;
        info!("Employee saved: {} ({})", employee.username, employee.id);
        Ok(employee)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.records.delete(id).await?;
        info!("Employee deleted: {}", id);
        Ok(())
    }

    pub fn list(&self) -> Vec<Employee> {
        self.records.list()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Employee> {
        self.records.get_by_id(id)
    }

    pub fn active(&self) -> Vec<Employee> {
        self.records.filter(Employee::is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmployeeStatus;
    use crate::repositories::MockTenantStore;
    use crate::services::testing::{collection_with, fixture_context};

    #[tokio::test]
    async fn test_edit_keeps_creator() {
        let mut store = MockTenantStore::new();
        store.expect_write().times(1).returning(|_, _, _, _| Ok(()));

        let original = EmployeeDraft::new("maria").into_employee("GBTech", Utc::now()).unwrap();
        let service = EmployeeService::new(collection_with(store, fixture_context(), vec![original.clone()]));

        let mut draft = EmployeeDraft::from(original.clone());
        draft.status = Some(EmployeeStatus::Suspended);
        let saved = service.save(draft).await.unwrap();

        assert_eq!(saved.id, original.id);
        assert_eq!(saved.created_by, "GBTech");
        assert_eq!(saved.last_modified_by, "Jess");
        assert!(service.active().iter().any(|e| e.id == original.id));
    }
}
