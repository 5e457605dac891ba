//! Employee domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use homecare_shared::{new_id, EntityId};

use super::{blank_to_default, require_text, Collection, Role, StoredRecord};
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    Suspended,
    Terminated,
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        EmployeeStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EntityId,

    #[validate(length(min = 1, max = 80, message = "Username must be between 1 and 80 characters"))]
    pub username: String,

    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub emergency_contact: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub notes: String,

    // Audit fields
    #[serde(default)]
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_modified_by: String,
    pub last_modified_at: DateTime<Utc>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            ("", "") => self.username.clone(),
            (f, "") => f.to_string(),
            ("", l) => l.to_string(),
            (f, l) => format!("{} {}", f, l),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

impl StoredRecord for Employee {
    const COLLECTION: Collection = Collection::Employees;

    fn record_id(&self) -> String {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeDraft {
    pub id: Option<EntityId>,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub status: Option<EmployeeStatus>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub skills: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl EmployeeDraft {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn into_employee(self, modified_by: &str, now: DateTime<Utc>) -> Result<Employee, DomainError> {
        require_text(&self.username, "Employee username is required")?;

        let employee = Employee {
            id: self.id.filter(|id| !id.trim().is_empty()).unwrap_or_else(new_id),
            username: self.username,
            email: blank_to_default(self.email),
            first_name: blank_to_default(self.first_name),
            last_name: blank_to_default(self.last_name),
            role: self.role.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            phone: blank_to_default(self.phone),
            address: blank_to_default(self.address),
            emergency_contact: blank_to_default(self.emergency_contact),
            skills: self.skills.unwrap_or_default(),
            certifications: self.certifications.unwrap_or_default(),
            notes: blank_to_default(self.notes),
            created_by: self.created_by.unwrap_or_else(|| modified_by.to_string()),
            created_at: self.created_at.unwrap_or(now),
            last_modified_by: modified_by.to_string(),
            last_modified_at: now,
        };

        employee.validate()?;
        Ok(employee)
    }
}

impl From<Employee> for EmployeeDraft {
    fn from(e: Employee) -> Self {
        Self {
            id: Some(e.id),
            username: e.username,
            email: Some(e.email),
            first_name: Some(e.first_name),
            last_name: Some(e.last_name),
            role: Some(e.role),
            status: Some(e.status),
            phone: Some(e.phone),
            address: Some(e.address),
            emergency_contact: Some(e.emergency_contact),
            skills: Some(e.skills),
            certifications: Some(e.certifications),
            notes: Some(e.notes),
            created_by: Some(e.created_by),
            created_at: Some(e.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let e = EmployeeDraft::new("maria").into_employee("Jess", Utc::now()).unwrap();
        assert_eq!(e.role, Role::Caregiver);
        assert_eq!(e.status, EmployeeStatus::Active);
        assert!(e.skills.is_empty());
        assert!(e.certifications.is_empty());
        assert_eq!(e.created_by, "Jess");
        assert_eq!(e.full_name(), "maria");
    }

    #[test]
    fn test_full_name() {
        let mut draft = EmployeeDraft::new("maria");
        draft.first_name = Some("Maria".into());
        draft.last_name = Some("Lopez".into());
        let e = draft.into_employee("Jess", Utc::now()).unwrap();
        assert_eq!(e.full_name(), "Maria Lopez");
    }

    #[test]
    fn test_blank_username_rejected() {
        assert!(EmployeeDraft::new(" ")
            .into_employee("Jess", Utc::now())
            .unwrap_err()
            .is_validation());
    }
}
