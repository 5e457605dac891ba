// ============================================================================
// HomeCare Core - Care Action Entity
// File: crates/homecare-core/src/domain/care_action.rs
// Description: A care task performed for a client on a given date
// ============================================================================

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use homecare_shared::{hhmm, new_id, now_hhmm, EntityId};

use super::{blank_to_default, require_text, CareTaskDefinition, Collection, StoredRecord, TaskCategory};
use crate::error::DomainError;

/// Priority shared by care actions and scheduled tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Priority::Normal),
            "high" => Some(Priority::High),
            "urgent" => Some(Priority::Urgent),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Completed,
    Pending,
    Cancelled,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::Completed => "completed",
            ActionStatus::Pending => "pending",
            ActionStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for ActionStatus {
    fn default() -> Self {
        ActionStatus::Completed
    }
}

/// Care action entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CareAction {
    pub id: EntityId,
    /// Not checked against existing clients; may dangle after a client is deleted.
    pub client_id: EntityId,
    pub task_id: u32,

    #[validate(length(min = 1, max = 200, message = "Task name must be between 1 and 200 characters"))]
    pub task_name: String,
    pub task_category: TaskCategory,

    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,

    #[validate(length(max = 1000, message = "Notes too long"))]
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: ActionStatus,
    #[serde(default)]
    pub priority: Priority,

    // Attribution
    #[serde(default)]
    pub logged_by: String,
    pub created_at: DateTime<Utc>,
}

impl CareAction {
    /// Sort key: newest date first, then newest time.
    pub fn occurred_at(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.time)
    }
}

impl StoredRecord for CareAction {
    const COLLECTION: Collection = Collection::CareActions;

    fn record_id(&self) -> String {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CareActionDraft {
    pub id: Option<EntityId>,
    pub client_id: String,
    pub task_id: Option<u32>,
    pub task_name: String,
    pub task_category: Option<TaskCategory>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub status: Option<ActionStatus>,
    pub priority: Option<Priority>,
}

impl CareActionDraft {
    /// Draft for performing catalog task `task` for `client_id` on `date`.
    pub fn for_task(client_id: impl Into<String>, task: &CareTaskDefinition, date: NaiveDate) -> Self {
        Self {
            client_id: client_id.into(),
            task_id: Some(task.id),
            task_name: task.name.clone(),
            task_category: Some(task.category),
            date: Some(date),
            ..Default::default()
        }
    }

    pub fn into_action(self, logged_by: &str, now: DateTime<Utc>) -> Result<CareAction, DomainError> {
        require_text(&self.client_id, "Please select a client")?;
        let task_id = self
            .task_id
            .ok_or_else(|| DomainError::ValidationError("Please select a care task".into()))?;
        require_text(&self.task_name, "Task name is required")?;
        let task_category = self
            .task_category
            .ok_or_else(|| DomainError::ValidationError("Task category is required".into()))?;
        let date = self
            .date
            .ok_or_else(|| DomainError::ValidationError("Action date is required".into()))?;

        let action = CareAction {
            id: self.id.filter(|id| !id.trim().is_empty()).unwrap_or_else(new_id),
            client_id: self.client_id,
            task_id,
            task_name: self.task_name,
            task_category,
            date,
            time: self.time.unwrap_or_else(now_hhmm),
            notes: blank_to_default(self.notes),
            status: self.status.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            logged_by: logged_by.to_string(),
            created_at: now,
        };

        action.validate()?;
        Ok(action)
    }
}
