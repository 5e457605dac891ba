// ============================================================================
// HomeCare Core - Care Task Catalog Service
// File: crates/homecare-core/src/services/care_task_service.rs
// Description: Read access to the tenant catalog and first-run seeding
// ============================================================================

use chrono::Utc;
use tracing::{error, info};

use crate::domain::{default_catalog, CareTaskDefinition, StoredRecord, TaskCategory};
use crate::error::DomainError;

use super::scope::TenantCollection;

pub struct CareTaskService {
    records: TenantCollection<CareTaskDefinition>,
}

impl CareTaskService {
    pub fn new(records: TenantCollection<CareTaskDefinition>) -> Self {
        Self { records }
    }

    /// Catalog ordered by id.
    pub fn list(&self) -> Vec<CareTaskDefinition> {
        let mut tasks = self.records.list();
        tasks.sort_by_key(|t| t.id);
        tasks
    }

    pub fn get_by_id(&self, id: u32) -> Option<CareTaskDefinition> {
        self.records.get_by_id(&id.to_string())
    }

    pub fn common_only(&self) -> Vec<CareTaskDefinition> {
        self.list().into_iter().filter(|t| t.common).collect()
    }

    pub fn by_category(&self, category: TaskCategory) -> Vec<CareTaskDefinition> {
        self.list().into_iter().filter(|t| t.category == category).collect()
    }

    /// Writes the default catalog when the tenant has no catalog yet.
    /// Returns how many definitions were written.
    pub async fn seed_defaults(&self) -> Result<usize, DomainError> {
        let ctx = self.records.scope().require()?;
        let existing = self
            .records
            .store()
            .read_once(&ctx.tenant_id, CareTaskDefinition::COLLECTION)
            .await
            .map_err(|e| {
                error!("Failed to read care task catalog for {}: {}", ctx.tenant_id, e);
                e
            })?;

        if !existing.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let mut written = 0;
        for mut task in default_catalog() {
            task.created_at = Some(now);
            task.created_by = Some(ctx.username.clone());
            self.records.put(&task).await?;
            written += 1;
        }

        info!("Seeded {} care tasks for tenant {}", written, ctx.tenant_id);
        Ok(written)
    }
}
