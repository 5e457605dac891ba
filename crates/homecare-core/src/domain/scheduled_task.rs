// ============================================================================
// HomeCare Core - Scheduled Task Entity
// File: crates/homecare-core/src/domain/scheduled_task.rs
// Description: Planned care action not yet performed
// ============================================================================

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use homecare_shared::{hhmm, new_id, utils::non_blank, EntityId};

use super::{
    blank_to_default, require_text, ActionStatus, CareActionDraft, CareTaskDefinition, Collection,
    Priority, StoredRecord, TaskCategory,
};
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            "cancelled" => Some(TaskStatus::Cancelled),
            _ => None,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub id: EntityId,
    pub client_id: EntityId,
    pub task_id: u32,

    #[validate(length(min = 1, max = 200, message = "Task name must be between 1 and 200 characters"))]
    pub task_name: String,
    pub task_category: TaskCategory,

    pub scheduled_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub scheduled_time: NaiveTime,

    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,

    #[validate(length(max = 1000, message = "Notes too long"))]
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

impl ScheduledTask {
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    pub fn is_urgent_pending(&self) -> bool {
        self.is_pending() && self.priority == Priority::Urgent
    }

    /// Still open and scheduled before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        matches!(self.status, TaskStatus::Pending | TaskStatus::InProgress) && self.scheduled_date < today
    }

    /// Care action carrying this task's client, task, date and time. `notes`
    /// replaces the task notes when it has content.
    pub fn to_care_action_draft(&self, notes: Option<&str>) -> CareActionDraft {
        CareActionDraft {
            id: None,
            client_id: self.client_id.clone(),
            task_id: Some(self.task_id),
            task_name: self.task_name.clone(),
            task_category: Some(self.task_category),
            date: Some(self.scheduled_date),
            time: Some(self.scheduled_time),
            notes: Some(non_blank(notes).unwrap_or_else(|| self.notes.clone())),
            status: Some(ActionStatus::Completed),
            priority: Some(self.priority),
        }
    }
}

impl StoredRecord for ScheduledTask {
    const COLLECTION: Collection = Collection::ScheduledTasks;

    fn record_id(&self) -> String {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduledTaskDraft {
    pub id: Option<EntityId>,
    pub client_id: String,
    pub task_id: Option<u32>,
    pub task_name: String,
    pub task_category: Option<TaskCategory>,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<NaiveTime>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ScheduledTaskDraft {
    pub fn for_task(
        client_id: impl Into<String>,
        task: &CareTaskDefinition,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            task_id: Some(task.id),
            task_name: task.name.clone(),
            task_category: Some(task.category),
            scheduled_date: Some(date),
            scheduled_time: Some(time),
            ..Default::default()
        }
    }

    pub fn into_task(self, modified_by: &str, now: DateTime<Utc>) -> Result<ScheduledTask, DomainError> {
        require_text(&self.client_id, "Please select a client")?;
        let task_id = self
            .task_id
            .ok_or_else(|| DomainError::ValidationError("Please select a care task".into()))?;
        require_text(&self.task_name, "Task name is required")?;
        let task_category = self
            .task_category
            .ok_or_else(|| DomainError::ValidationError("Task category is required".into()))?;
        let scheduled_date = self
            .scheduled_date
            .ok_or_else(|| DomainError::ValidationError("Scheduled date is required".into()))?;
        let scheduled_time = self
            .scheduled_time
            .ok_or_else(|| DomainError::ValidationError("Scheduled time is required".into()))?;

        let task = ScheduledTask {
            id: self.id.filter(|id| !id.trim().is_empty()).unwrap_or_else(new_id),
            client_id: self.client_id,
            task_id,
            task_name: self.task_name,
            task_category,
            scheduled_date,
            scheduled_time,
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            notes: blank_to_default(self.notes),
            created_by: self.created_by.unwrap_or_else(|| modified_by.to_string()),
            created_at: self.created_at.unwrap_or(now),
            last_modified_by: modified_by.to_string(),
            last_modified_at: now,
        };

        task.validate()?;
        Ok(task)
    }
}

impl From<ScheduledTask> for ScheduledTaskDraft {
    fn from(task: ScheduledTask) -> Self {
        Self {
            id: Some(task.id),
            client_id: task.client_id,
            task_id: Some(task.task_id),
            task_name: task.task_name,
            task_category: Some(task.task_category),
            scheduled_date: Some(task.scheduled_date),
            scheduled_time: Some(task.scheduled_time),
            priority: Some(task.priority),
            status: Some(task.status),
            notes: Some(task.notes),
            created_by: Some(task.created_by),
            created_at: Some(task.created_at),
        }
    }
}
