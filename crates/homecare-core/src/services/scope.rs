//! Tenant-scoped access shared by every service of one session

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::{StoredRecord, TenantContext};
use crate::error::DomainError;
use crate::repositories::{validate_segment, TenantStore};

use super::sync::SyncedCollection;

/// Signed-in context plus a liveness flag flipped off at teardown.
#[derive(Debug)]
pub struct SessionScope {
    context: TenantContext,
    active: AtomicBool,
}

impl SessionScope {
    pub fn new(context: TenantContext) -> Self {
        Self {
            context,
            active: AtomicBool::new(true),
        }
    }

    /// Context of a live session, `NotAuthenticated` after teardown.
    pub fn require(&self) -> Result<&TenantContext, DomainError> {
        if self.active.load(Ordering::Acquire) {
            Ok(&self.context)
        } else {
            Err(DomainError::NotAuthenticated)
        }
    }

    /// Like [`SessionScope::require`], and the role must be allowed to delete.
    pub fn require_delete(&self) -> Result<&TenantContext, DomainError> {
        let ctx = self.require()?;
        if !ctx.role.can_delete() {
            return Err(DomainError::PermissionDenied(format!(
                "role {} cannot delete records",
                ctx.role.as_str()
            )));
        }
        Ok(ctx)
    }

    pub fn context(&self) -> &TenantContext {
        &self.context
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }
}

/// One collection of the signed-in tenant: writes go to the store, reads come
/// from the synced snapshot.
pub struct TenantCollection<T> {
    store: Arc<dyn TenantStore>,
    scope: Arc<SessionScope>,
    synced: Arc<SyncedCollection<T>>,
}

impl<T: StoredRecord> TenantCollection<T> {
    pub fn new(store: Arc<dyn TenantStore>, scope: Arc<SessionScope>, synced: Arc<SyncedCollection<T>>) -> Self {
        Self {
            store,
            scope,
            synced,
        }
    }

    pub fn scope(&self) -> &SessionScope {
        &self.scope
    }

    pub fn store(&self) -> &Arc<dyn TenantStore> {
        &self.store
    }

    /// Username to stamp as author of a write.
    pub fn actor(&self) -> Result<String, DomainError> {
        Ok(self.scope.require()?.username.clone())
    }

    pub async fn put(&self, record: &T) -> Result<(), DomainError> {
        let ctx = self.scope.require()?;
        let id = record.record_id();
        validate_segment("record id", &id)?;
        let value = serde_json::to_value(record)?;

        debug!("Writing {} record {} for tenant {}", T::COLLECTION, id, ctx.tenant_id);
        self.store
            .write(&ctx.tenant_id, T::COLLECTION, &id, value)
            .await
            .map_err(|e| {
                error!("Failed to write {} record {}: {}", T::COLLECTION, id, e);
                e
            })
    }

    /// User-initiated delete; the signed-in role must permit it.
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.scope.require_delete().map_err(|e| {
            error!("Refused delete of {} record {}: {}", T::COLLECTION, id, e);
            e
        })?;
        self.remove(id).await
    }

    /// Removal as part of another operation, without the role check.
    pub async fn remove(&self, id: &str) -> Result<(), DomainError> {
        let ctx = self.scope.require()?;
        validate_segment("record id", id)?;

        debug!("Deleting {} record {} for tenant {}", T::COLLECTION, id, ctx.tenant_id);
        self.store
            .delete(&ctx.tenant_id, T::COLLECTION, id)
            .await
            .map_err(|e| {
                error!("Failed to delete {} record {}: {}", T::COLLECTION, id, e);
                e
            })
    }

    /// Empty once the session is torn down.
    pub fn list(&self) -> Vec<T> {
        if !self.scope.is_active() {
            return Vec::new();
        }
        self.synced.list()
    }

    pub fn get_by_id(&self, id: &str) -> Option<T> {
        if !self.scope.is_active() {
            return None;
        }
        self.synced.get_by_id(id)
    }

    pub fn filter<F>(&self, pred: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        if !self.scope.is_active() {
            return Vec::new();
        }
        self.synced.filter(pred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Client, Role};
    use crate::repositories::MockTenantStore;
    use crate::services::testing::collection_with;

    #[test]
    fn test_caregiver_cannot_delete() {
        let scope = SessionScope::new(TenantContext::new("maria", "Jess", Role::Caregiver, "Maria"));
        assert!(matches!(scope.require_delete(), Err(DomainError::PermissionDenied(_))));

        let scope = SessionScope::new(TenantContext::new("sam", "Jess", Role::Supervisor, "Sam"));
        assert_eq!(scope.require_delete().unwrap().username, "sam");
    }

    #[tokio::test]
    async fn test_denied_delete_never_reaches_store() {
        let mut store = MockTenantStore::new();
        store.expect_delete().times(0);
        let records = collection_with::<Client>(
            store,
            TenantContext::new("maria", "Jess", Role::Caregiver, "Maria"),
            vec![],
        );

        let err = records.delete("c1").await.unwrap_err();
        assert!(err.is_auth());
    }

    #[test]
    fn test_scope_require_after_deactivate() {
        let scope = SessionScope::new(TenantContext::new("Jess", "Jess", Role::Admin, "Jess"));
        assert_eq!(scope.require().unwrap().tenant_id, "Jess");
        scope.deactivate();
        assert_eq!(scope.require().unwrap_err(), DomainError::NotAuthenticated);
        assert_eq!(scope.context().username, "Jess");
    }
}
