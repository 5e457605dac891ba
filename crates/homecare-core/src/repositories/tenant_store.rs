//! Tenant store trait (port)

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

use crate::domain::Collection;
use crate::error::DomainError;

/// A single stored record, kept schemaless at the store boundary.
pub type Record = serde_json::Value;

/// Every record of one collection keyed by id (a full state, never a diff).
pub type Snapshot = BTreeMap<String, Record>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Stream of full snapshots starting with the current state.
    async fn subscribe(&self, tenant_id: &str, collection: Collection) -> Result<SnapshotStream, DomainError>;
    /// Full overwrite of the record at `id`; last write wins.
    async fn write(&self, tenant_id: &str, collection: Collection, id: &str, record: Record) -> Result<(), DomainError>;
    /// Removes one record. Dependent records are left alone.
    async fn delete(&self, tenant_id: &str, collection: Collection, id: &str) -> Result<(), DomainError>;
    async fn read_once(&self, tenant_id: &str, collection: Collection) -> Result<Snapshot, DomainError>;
}

/// Full-snapshot updates for one collection path.
pub struct SnapshotStream {
    path: String,
    initial: Option<Arc<Snapshot>>,
    rx: broadcast::Receiver<Arc<Snapshot>>,
}

impl SnapshotStream {
    pub fn new(path: impl Into<String>, initial: Snapshot, rx: broadcast::Receiver<Arc<Snapshot>>) -> Self {
        Self {
            path: path.into(),
            initial: Some(Arc::new(initial)),
            rx,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Next full snapshot. `None` once the store side is gone.
    pub async fn next(&mut self) -> Option<Arc<Snapshot>> {
        if let Some(initial) = self.initial.take() {
            return Some(initial);
        }
        loop {
            match self.rx.recv().await {
                Ok(snapshot) => return Some(snapshot),
                // Older snapshots are superseded by whatever is still queued.
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Subscriber on {} lagged, skipped {} snapshots", self.path, skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

/// Tenant ids and record ids become path segments and may not be empty or
/// contain the separator.
pub fn validate_segment(kind: &str, segment: &str) -> Result<(), DomainError> {
    if segment.trim().is_empty() || segment.contains('/') {
        return Err(DomainError::InvalidPath(format!("{} '{}'", kind, segment)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_stream_yields_initial_then_updates() {
        let (tx, rx) = broadcast::channel(4);
        let mut initial = Snapshot::new();
        initial.insert("a".into(), json!({"id": "a"}));
        let mut stream = SnapshotStream::new("tenants/t/clients", initial, rx);

        let first = stream.next().await.unwrap();
        assert_eq!(first.len(), 1);

        let mut next = Snapshot::new();
        next.insert("a".into(), json!({"id": "a"}));
        next.insert("b".into(), json!({"id": "b"}));
        tx.send(Arc::new(next)).unwrap();
        assert_eq!(stream.next().await.unwrap().len(), 2);

        drop(tx);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_lagged_stream_keeps_latest() {
        let (tx, rx) = broadcast::channel(2);
        let mut stream = SnapshotStream::new("tenants/t/clients", Snapshot::new(), rx);
        stream.next().await.unwrap();

        for n in 0..5 {
            let mut s = Snapshot::new();
            for i in 0..=n {
                s.insert(i.to_string(), json!({}));
            }
            tx.send(Arc::new(s)).unwrap();
        }

        let mut last = 0;
        while let Ok(Some(s)) =
            tokio::time::timeout(std::time::Duration::from_millis(50), stream.next()).await
        {
            last = s.len();
        }
        assert_eq!(last, 5);
    }

    #[test]
    fn test_validate_segment() {
        assert!(validate_segment("tenant", "Jess").is_ok());
        assert!(validate_segment("tenant", "").is_err());
        assert!(validate_segment("id", "a/b").is_err());
    }
}
