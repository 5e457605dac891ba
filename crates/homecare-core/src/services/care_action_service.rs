// ============================================================================
// HomeCare Core - Care Action Service
// File: crates/homecare-core/src/services/care_action_service.rs
// ============================================================================
//! Logged care actions of the signed-in tenant

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::{info, warn};

use crate::domain::{default_catalog, CareAction, CareActionDraft, CareTaskDefinition, Priority};
use crate::error::DomainError;

use super::scope::TenantCollection;
use super::sync::SyncedCollection;

/// Several catalog tasks performed for one client at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogActionsRequest {
    pub client_id: String,
    pub task_ids: Vec<u32>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub priority: Option<Priority>,
}

pub struct CareActionService {
    records: TenantCollection<CareAction>,
    catalog: Arc<SyncedCollection<CareTaskDefinition>>,
}

impl CareActionService {
    pub fn new(records: TenantCollection<CareAction>, catalog: Arc<SyncedCollection<CareTaskDefinition>>) -> Self {
        Self { records, catalog }
    }

    pub async fn save(&self, draft: CareActionDraft) -> Result<CareAction, DomainError> {
        let actor = self.records.actor()?;
        let action = draft.into_action(&actor, Utc::now())?;

        self.records.put(&action).await?;
        info!(
            "Care action logged: {} for client {} ({})",
            action.task_name, action.client_id, action.id
        );
        Ok(action)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.records.delete(id).await?;
        info!("Care action deleted: {}", id);
        Ok(())
    }

    pub fn list(&self) -> Vec<CareAction> {
        self.records.list()
    }

    pub fn get_by_id(&self, id: &str) -> Option<CareAction> {
        self.records.get_by_id(id)
    }

    pub fn for_client(&self, client_id: &str) -> Vec<CareAction> {
        self.records.filter(|a| a.client_id == client_id)
    }

    pub fn sorted_newest_first(&self) -> Vec<CareAction> {
        let mut actions = self.list();
        actions.sort_by_key(|a| Reverse(a.occurred_at()));
        actions
    }

    pub fn recent_for_client(&self, client_id: &str, limit: usize) -> Vec<CareAction> {
        let mut actions = self.for_client(client_id);
        actions.sort_by_key(|a| Reverse(a.occurred_at()));
        actions.truncate(limit);
        actions
    }

    /// One action per selected task. Unknown task ids are skipped; at least
    /// one must resolve against the catalog.
    pub async fn log_tasks(&self, request: LogActionsRequest) -> Result<Vec<CareAction>, DomainError> {
        if request.client_id.trim().is_empty() {
            return Err(DomainError::ValidationError("Please select a client".into()));
        }
        let date = request
            .date
            .ok_or_else(|| DomainError::ValidationError("Action date is required".into()))?;

        let tasks: Vec<CareTaskDefinition> = request
            .task_ids
            .iter()
            .filter_map(|id| {
                let task = self.resolve_task(*id);
                if task.is_none() {
                    warn!("Skipping unknown care task id {}", id);
                }
                task
            })
            .collect();

        if tasks.is_empty() {
            return Err(DomainError::ValidationError("Please select at least one care task".into()));
        }

        let mut logged = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let mut draft = CareActionDraft::for_task(request.client_id.clone(), task, date);
            draft.time = request.time;
            draft.notes = request.notes.clone();
            draft.priority = request.priority;
            logged.push(self.save(draft).await?);
        }
        Ok(logged)
    }

    /// Catalog entry by id, falling back to the built-in catalog before the
    /// synced one is populated.
    pub fn resolve_task(&self, id: u32) -> Option<CareTaskDefinition> {
        self.catalog
            .find(|t| t.id == id)
            .or_else(|| default_catalog().into_iter().find(|t| t.id == id))
    }
}
