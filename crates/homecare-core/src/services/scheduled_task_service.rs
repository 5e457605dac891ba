// ============================================================================
// HomeCare Core - Scheduled Task Service
// File: crates/homecare-core/src/services/scheduled_task_service.rs
// Description: Planned tasks and their conversion into care actions
// ============================================================================

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::{error, info, warn};

use crate::domain::{CareAction, Collection, Priority, ScheduledTask, ScheduledTaskDraft, TaskStatus};
use crate::error::DomainError;

use super::care_action_service::CareActionService;
use super::scope::TenantCollection;

/// Several catalog tasks planned for one client at the same slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleTasksRequest {
    pub client_id: String,
    pub task_ids: Vec<u32>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

/// Criteria for [`ScheduledTaskService::search`]; unset fields match everything.
/// Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduledTaskFilter {
    pub client_id: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ScheduledTaskFilter {
    pub fn matches(&self, task: &ScheduledTask) -> bool {
        self.client_id.as_deref().map_or(true, |id| task.client_id == id)
            && self.status.map_or(true, |s| task.status == s)
            && self.priority.map_or(true, |p| task.priority == p)
            && self.from.map_or(true, |d| task.scheduled_date >= d)
            && self.to.map_or(true, |d| task.scheduled_date <= d)
    }
}

pub struct ScheduledTaskService {
    records: TenantCollection<ScheduledTask>,
    actions: Arc<CareActionService>,
}

impl ScheduledTaskService {
    pub fn new(records: TenantCollection<ScheduledTask>, actions: Arc<CareActionService>) -> Self {
        Self { records, actions }
    }

    pub async fn save(&self, draft: ScheduledTaskDraft) -> Result<ScheduledTask, DomainError> {
        let actor = self.records.actor()?;
        let task = draft.into_task(&actor, Utc::now())?;

        self.records.put(&task).await?;
        info!(
            "Scheduled task saved: {} for client {} on {} ({})",
            task.task_name, task.client_id, task.scheduled_date, task.id
        );
        Ok(task)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.records.delete(id).await?;
        info!("Scheduled task deleted: {}", id);
        Ok(())
    }

    pub fn list(&self) -> Vec<ScheduledTask> {
        self.records.list()
    }

    pub fn get_by_id(&self, id: &str) -> Option<ScheduledTask> {
        self.records.get_by_id(id)
    }

    pub fn pending(&self) -> Vec<ScheduledTask> {
        self.records.filter(ScheduledTask::is_pending)
    }

    /// Matching tasks, earliest slot first.
    pub fn search(&self, filter: &ScheduledTaskFilter) -> Vec<ScheduledTask> {
        let mut tasks = self.records.filter(|t| filter.matches(t));
        tasks.sort_by_key(|t| (t.scheduled_date, t.scheduled_time));
        tasks
    }

    /// Open tasks scheduled before `today`, oldest first.
    pub fn overdue(&self, today: NaiveDate) -> Vec<ScheduledTask> {
        let mut tasks = self.records.filter(|t| t.is_overdue(today));
        tasks.sort_by_key(|t| (t.scheduled_date, t.scheduled_time));
        tasks
    }

    /// One pending task per resolvable catalog id. Unknown ids are skipped;
    /// at least one must resolve.
    pub async fn schedule_tasks(&self, request: ScheduleTasksRequest) -> Result<Vec<ScheduledTask>, DomainError> {
        if request.client_id.trim().is_empty() {
            return Err(DomainError::ValidationError("Please select a client".into()));
        }

        let definitions: Vec<_> = request
            .task_ids
            .iter()
            .filter_map(|id| {
                let task = self.actions.resolve_task(*id);
                if task.is_none() {
                    warn!("Skipping unknown care task id {}", id);
                }
                task
            })
            .collect();
        if definitions.is_empty() {
            return Err(DomainError::ValidationError("Please select at least one task".into()));
        }

        let mut scheduled = Vec::with_capacity(definitions.len());
        for definition in &definitions {
            let mut draft =
                ScheduledTaskDraft::for_task(request.client_id.clone(), definition, request.date, request.time);
            draft.priority = request.priority;
            draft.notes = request.notes.clone();
            scheduled.push(self.save(draft).await?);
        }
        info!("{} tasks scheduled for client {}", scheduled.len(), request.client_id);
        Ok(scheduled)
    }

    /// Marks the task cancelled. Cancelling a cancelled task writes nothing.
    pub async fn cancel(&self, id: &str) -> Result<ScheduledTask, DomainError> {
        let task = self.require_task(id)?;
        if task.status == TaskStatus::Cancelled {
            info!("Scheduled task {} already cancelled", id);
            return Ok(task);
        }

        let mut draft = ScheduledTaskDraft::from(task);
        draft.status = Some(TaskStatus::Cancelled);
        let cancelled = self.save(draft).await?;
        info!("Scheduled task cancelled: {}", cancelled.id);
        Ok(cancelled)
    }

    /// Logs the task as a completed care action, then removes the task.
    ///
    /// The two writes are independent. When the delete fails the action
    /// stays stored and `CompletionIncomplete` names it; completing again
    /// would log a second action.
    pub async fn complete(&self, id: &str, notes: Option<&str>) -> Result<CareAction, DomainError> {
        let task = self.require_task(id)?;

        let action = self.actions.save(task.to_care_action_draft(notes)).await?;

        if let Err(e) = self.records.remove(&task.id).await {
            error!(
                "Care action {} saved but scheduled task {} remains: {}",
                action.id, task.id, e
            );
            return Err(DomainError::CompletionIncomplete {
                action_id: action.id,
                reason: e.to_string(),
            });
        }

        info!("Scheduled task {} completed as care action {}", task.id, action.id);
        Ok(action)
    }

    fn require_task(&self, id: &str) -> Result<ScheduledTask, DomainError> {
        self.records.scope().require()?;
        self.get_by_id(id).ok_or_else(|| DomainError::RecordNotFound {
            collection: Collection::ScheduledTasks.to_string(),
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{default_catalog, ActionStatus};
    use crate::repositories::MockTenantStore;
    use crate::services::sync::SyncedCollection;
    use crate::services::testing::{collection_with, fixture_context};
    use chrono::{NaiveDate, NaiveTime};
    use mockall::predicate::eq;

    fn pending_task() -> ScheduledTask {
        let catalog_task = default_catalog().into_iter().find(|t| t.id == 102).unwrap();
        let mut draft = ScheduledTaskDraft::for_task(
            "c1",
            &catalog_task,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveTime::from_hms_opt(10, 15, 0).unwrap(),
        );
        draft.notes = Some("before lunch".into());
        draft.into_task("Jess", Utc::now()).unwrap()
    }

    fn build(actions_store: MockTenantStore, tasks_store: MockTenantStore, task: ScheduledTask) -> ScheduledTaskService {
        let actions = CareActionService::new(
            collection_with(actions_store, fixture_context(), vec![]),
            Arc::new(SyncedCollection::new()),
        );
        ScheduledTaskService::new(
            collection_with(tasks_store, fixture_context(), vec![task]),
            Arc::new(actions),
        )
    }

    #[tokio::test]
    async fn test_complete_logs_action_then_deletes_task() {
        let task = pending_task();

        let mut actions_store = MockTenantStore::new();
        actions_store
            .expect_write()
            .withf(|_, collection, _, record| {
                *collection == Collection::CareActions
                    && record["notes"] == "before lunch"
                    && record["time"] == "10:15"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let mut tasks_store = MockTenantStore::new();
        let task_id = task.id.clone();
        tasks_store
            .expect_delete()
            .with(eq("Jess"), eq(Collection::ScheduledTasks), eq(task_id))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = build(actions_store, tasks_store, task.clone());
        let action = service.complete(&task.id, None).await.unwrap();

        assert_eq!(action.status, ActionStatus::Completed);
        assert_eq!(action.task_id, 102);
        assert_eq!(action.date, task.scheduled_date);
    }

    #[tokio::test]
    async fn test_complete_reports_failed_delete() {
        let task = pending_task();

        let mut actions_store = MockTenantStore::new();
        actions_store.expect_write().times(1).returning(|_, _, _, _| Ok(()));
        let mut tasks_store = MockTenantStore::new();
        tasks_store
            .expect_delete()
            .returning(|_, _, _| Err(DomainError::StoreError("offline".into())));

        let service = build(actions_store, tasks_store, task.clone());
        match service.complete(&task.id, Some("done")).await {
            Err(DomainError::CompletionIncomplete { action_id, reason }) => {
                assert!(!action_id.is_empty());
                assert!(reason.contains("offline"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    fn task_on(day: u32, status: TaskStatus, priority: Priority) -> ScheduledTask {
        let mut task = pending_task();
        task.id = format!("t{}-{}", day, status.as_str());
        task.scheduled_date = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        task.status = status;
        task.priority = priority;
        task
    }

    fn listing(tasks: Vec<ScheduledTask>) -> ScheduledTaskService {
        let actions = CareActionService::new(
            collection_with(MockTenantStore::new(), fixture_context(), vec![]),
            Arc::new(SyncedCollection::new()),
        );
        ScheduledTaskService::new(
            collection_with(MockTenantStore::new(), fixture_context(), tasks),
            Arc::new(actions),
        )
    }

    #[test]
    fn test_overdue_and_search() {
        let service = listing(vec![
            task_on(3, TaskStatus::Pending, Priority::Normal),
            task_on(1, TaskStatus::InProgress, Priority::Urgent),
            task_on(2, TaskStatus::Cancelled, Priority::Urgent),
            task_on(9, TaskStatus::Pending, Priority::High),
        ]);
        let today = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();

        let overdue: Vec<_> = service.overdue(today).into_iter().map(|t| t.id).collect();
        assert_eq!(overdue, vec!["t1-in_progress", "t3-pending"]);

        let urgent = service.search(&ScheduledTaskFilter {
            priority: Some(Priority::Urgent),
            ..Default::default()
        });
        assert_eq!(urgent.len(), 2);

        let window = service.search(&ScheduledTaskFilter {
            status: Some(TaskStatus::Pending),
            from: Some(NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()),
            to: Some(NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()),
            ..Default::default()
        });
        let ids: Vec<_> = window.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["t3-pending", "t9-pending"]);
    }

    #[tokio::test]
    async fn test_cancel_writes_cancelled_status_once() {
        let open = pending_task();
        let mut done = pending_task();
        done.id = "already".into();
        done.status = TaskStatus::Cancelled;

        let mut tasks_store = MockTenantStore::new();
        let open_id = open.id.clone();
        tasks_store
            .expect_write()
            .withf(move |_, collection, id, record| {
                *collection == Collection::ScheduledTasks && *id == open_id && record["status"] == "cancelled"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let actions = CareActionService::new(
            collection_with(MockTenantStore::new(), fixture_context(), vec![]),
            Arc::new(SyncedCollection::new()),
        );
        let service = ScheduledTaskService::new(
            collection_with(tasks_store, fixture_context(), vec![open.clone(), done]),
            Arc::new(actions),
        );

        let cancelled = service.cancel(&open.id).await.unwrap();
        assert_eq!(cancelled.status, TaskStatus::Cancelled);
        assert_eq!(cancelled.created_at, open.created_at);
        assert_eq!(service.cancel("already").await.unwrap().status, TaskStatus::Cancelled);
        assert!(matches!(service.cancel("missing").await, Err(DomainError::RecordNotFound { .. })));
    }

    #[tokio::test]
    async fn test_schedule_tasks_skips_unknown_ids() {
        let mut tasks_store = MockTenantStore::new();
        tasks_store
            .expect_write()
            .withf(|_, _, _, record| record["clientId"] == "c1" && record["priority"] == "high")
            .times(2)
            .returning(|_, _, _, _| Ok(()));
        let actions = CareActionService::new(
            collection_with(MockTenantStore::new(), fixture_context(), vec![]),
            Arc::new(SyncedCollection::new()),
        );
        let service = ScheduledTaskService::new(
            collection_with(tasks_store, fixture_context(), vec![]),
            Arc::new(actions),
        );

        let request = ScheduleTasksRequest {
            client_id: "c1".into(),
            task_ids: vec![101, 999_999, 201],
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            priority: Some(Priority::High),
            notes: None,
        };
        let scheduled = service.schedule_tasks(request.clone()).await.unwrap();
        let ids: Vec<_> = scheduled.iter().map(|t| t.task_id).collect();
        assert_eq!(ids, vec![101, 201]);

        let err = service
            .schedule_tasks(ScheduleTasksRequest {
                task_ids: vec![999_999],
                ..request
            })
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::ValidationError("Please select at least one task".into()));
    }

    #[tokio::test]
    async fn test_complete_unknown_task() {
        let mut actions_store = MockTenantStore::new();
        actions_store.expect_write().times(0);
        let service = build(actions_store, MockTenantStore::new(), pending_task());

        let err = service.complete("missing", None).await.unwrap_err();
        assert!(matches!(err, DomainError::RecordNotFound { .. }));
    }
}
