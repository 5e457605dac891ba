//! In-memory collections fed by snapshot subscriptions

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::StoredRecord;
use crate::repositories::{Snapshot, SnapshotStream};

/// Latest decoded snapshot of one collection. Each applied snapshot replaces
/// the previous contents entirely.
pub struct SyncedCollection<T> {
    items: RwLock<Vec<T>>,
}

impl<T: StoredRecord> SyncedCollection<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Decodes every record of `snapshot`; records that do not decode are
    /// skipped with a warning.
    pub fn apply_snapshot(&self, snapshot: &Snapshot) {
        let mut decoded = Vec::with_capacity(snapshot.len());
        for (id, value) in snapshot {
            match serde_json::from_value::<T>(value.clone()) {
                Ok(item) => decoded.push(item),
                Err(e) => warn!("Skipping malformed {} record {}: {}", T::COLLECTION, id, e),
            }
        }
        debug!("Applied {} snapshot with {} records", T::COLLECTION, decoded.len());
        self.replace(decoded);
    }

    pub fn replace(&self, items: Vec<T>) {
        *self.items.write() = items;
    }

    pub fn clear(&self) {
        self.replace(Vec::new());
    }

    pub fn list(&self) -> Vec<T> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn find<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.items.read().iter().find(|item| pred(item)).cloned()
    }

    pub fn filter<F>(&self, pred: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.items.read().iter().filter(|item| pred(item)).cloned().collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<T> {
        self.find(|item| item.record_id() == id)
    }
}

impl<T: StoredRecord> Default for SyncedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies every snapshot from `stream` to `target` until the stream ends or
/// the task is aborted.
pub fn spawn_listener<T: StoredRecord>(
    mut stream: SnapshotStream,
    target: Arc<SyncedCollection<T>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(snapshot) = stream.next().await {
            target.apply_snapshot(&snapshot);
        }
        debug!("Snapshot stream for {} closed", stream.path());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Client, ClientDraft};
    use chrono::Utc;
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::broadcast;

    fn snapshot_of(clients: &[Client]) -> Snapshot {
        clients
            .iter()
            .map(|c| (c.id.clone(), serde_json::to_value(c).unwrap()))
            .collect()
    }

    #[test]
    fn test_apply_replaces_and_skips_malformed() {
        let synced = SyncedCollection::<Client>::new();
        let a = ClientDraft::new("A").into_client("Jess", Utc::now()).unwrap();
        let mut snapshot = snapshot_of(&[a.clone()]);
        snapshot.insert("broken".into(), json!({"name": 42}));

        synced.apply_snapshot(&snapshot);
        assert_eq!(synced.list(), vec![a.clone()]);
        assert_eq!(synced.get_by_id(&a.id), Some(a));

        synced.apply_snapshot(&Snapshot::new());
        assert!(synced.is_empty());
    }

    #[tokio::test]
    async fn test_listener_applies_stream() {
        let (tx, rx) = broadcast::channel(8);
        let synced = Arc::new(SyncedCollection::<Client>::new());
        let stream = SnapshotStream::new("tenants/t/clients", Snapshot::new(), rx);
        let handle = spawn_listener(stream, synced.clone());

        let a = ClientDraft::new("A").into_client("Jess", Utc::now()).unwrap();
        tx.send(Arc::new(snapshot_of(&[a.clone()]))).unwrap();

        for _ in 0..100 {
            if !synced.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(synced.list()[0].id, a.id);

        handle.abort();
    }
}
