//! Helpers for service unit tests

use std::sync::Arc;

use crate::domain::{Role, StoredRecord, TenantContext};
use crate::repositories::MockTenantStore;

use super::scope::{SessionScope, TenantCollection};
use super::sync::SyncedCollection;

pub fn fixture_context() -> TenantContext {
    TenantContext::new("Jess", "Jess", Role::Admin, "Jess - HomeCare Admin")
}

pub fn collection_with<T: StoredRecord>(store: MockTenantStore, context: TenantContext, items: Vec<T>) -> TenantCollection<T> {
    let synced = Arc::new(SyncedCollection::new());
    synced.replace(items);
    TenantCollection::new(Arc::new(store), Arc::new(SessionScope::new(context)), synced)
}
