//! # HomeCare Core - Domain Module
//! 
//! Domain entities persisted under a tenant namespace.

pub mod collection;
pub mod tenant;
pub mod client;
pub mod care_action;
pub mod scheduled_task;
pub mod employee;
pub mod care_task;

use serde::de::DeserializeOwned;
use serde::Serialize;

// Re-export all entities and enums
pub use collection::Collection;
pub use tenant::{Role, TenantContext};
pub use client::{Client, ClientDraft, ClientStatus, CareLevel};
pub use care_action::{CareAction, CareActionDraft, ActionStatus, Priority};
pub use scheduled_task::{ScheduledTask, ScheduledTaskDraft, TaskStatus};
pub use employee::{Employee, EmployeeDraft, EmployeeStatus};
pub use care_task::{CareTaskDefinition, TaskCategory, DEFAULT_CARE_TASKS, default_catalog};

/// A record stored under `tenants/{tenantId}/{collection}/{id}`.
pub trait StoredRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn record_id(&self) -> String;
}

pub(crate) fn blank_to_default(value: Option<String>) -> String {
    value.unwrap_or_default()
}

pub(crate) fn require_text(value: &str, message: &str) -> Result<(), crate::error::DomainError> {
    if value.trim().is_empty() {
        return Err(crate::error::DomainError::ValidationError(message.to_string()));
    }
    Ok(())
}
