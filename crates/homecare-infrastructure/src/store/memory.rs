// ============================================================================
// HomeCare Infrastructure - Memory Tenant Store
// File: crates/homecare-infrastructure/src/store/memory.rs
// Description: DashMap records with per-collection snapshot broadcast
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, error, info};

use homecare_core::repositories::{validate_segment, Record, Snapshot, SnapshotStream, TenantStore};
use homecare_core::{Collection, DomainError};
use homecare_shared::config::StoreSettings;
use homecare_shared::constants::DEFAULT_PUBSUB_CAPACITY;

use super::bus::SnapshotBus;
use super::kv::RecordKv;
use super::metrics::StoreMetrics;
use super::persist::SnapshotFile;

#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub snapshot_path: Option<PathBuf>,
    pub pubsub_capacity: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            pubsub_capacity: DEFAULT_PUBSUB_CAPACITY,
        }
    }
}

impl From<&StoreSettings> for StoreOptions {
    fn from(settings: &StoreSettings) -> Self {
        Self {
            snapshot_path: settings
                .snapshot_path
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            pubsub_capacity: settings.pubsub_capacity,
        }
    }
}

/// A change to one record, applied through the commit lock.
enum Change {
    Put(Record),
    Remove,
}

pub struct MemoryTenantStore {
    kv: RecordKv,
    bus: SnapshotBus,
    metrics: Arc<StoreMetrics>,
    file: Option<SnapshotFile>,
    // Serializes commits; the file and published snapshots follow acknowledgement order.
    commit: Mutex<()>,
}

impl MemoryTenantStore {
    /// In-memory only store with default options.
    pub fn new() -> Self {
        let metrics = Arc::new(StoreMetrics::new());
        Self {
            kv: RecordKv::default(),
            bus: SnapshotBus::new(DEFAULT_PUBSUB_CAPACITY, metrics.clone()),
            metrics,
            file: None,
            commit: Mutex::new(()),
        }
    }

    /// Opens the store, loading the snapshot file when one is configured.
    pub fn open(options: StoreOptions) -> Result<Self, DomainError> {
        let metrics = Arc::new(StoreMetrics::new());
        let (kv, file) = match options.snapshot_path {
            Some(path) => {
                let file = SnapshotFile::new(path);
                let entries = file.load().map_err(|e| {
                    error!("Failed to load store snapshot: {}", e);
                    e.into_store_error()
                })?;
                info!("Loaded {} records from {}", entries.len(), file.path().display());
                (RecordKv::from_entries(entries), Some(file))
            }
            None => (RecordKv::default(), None),
        };

        Ok(Self {
            kv,
            bus: SnapshotBus::new(options.pubsub_capacity, metrics.clone()),
            metrics,
            file,
            commit: Mutex::new(()),
        })
    }

    pub fn metrics(&self) -> &Arc<StoreMetrics> {
        &self.metrics
    }

    fn collection_prefix(tenant_id: &str, collection: Collection) -> Result<String, DomainError> {
        validate_segment("tenant id", tenant_id)?;
        Ok(format!("{}/", collection.path(tenant_id)))
    }

    /// Persists the state with `change` applied and only then applies it in
    /// memory and publishes. A failed persist leaves the store untouched.
    /// Returns false when removing an absent record.
    fn commit(&self, prefix: &str, key: String, change: Change) -> Result<bool, DomainError> {
        let _guard = self.commit.lock();

        if let Some(file) = &self.file {
            let mut entries = self.kv.entries();
            match &change {
                Change::Put(record) => {
                    entries.insert(key.clone(), record.clone());
                }
                Change::Remove => {
                    entries.remove(&key);
                }
            }
            file.save(&entries).map_err(|e| {
                self.metrics.inc_persist_failure();
                error!("Failed to persist store snapshot: {}", e);
                e.into_store_error()
            })?;
        }

        let existed = match change {
            Change::Put(record) => {
                self.kv.set(key, record);
                true
            }
            Change::Remove => self.kv.del(&key),
        };
        self.publish(prefix);
        Ok(existed)
    }

    fn publish(&self, prefix: &str) {
        let snapshot = self.kv.scan(prefix);
        debug!("Publishing {} records on {}", snapshot.len(), prefix);
        self.bus.publish(prefix, snapshot);
    }
}

impl Default for MemoryTenantStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TenantStore for MemoryTenantStore {
    async fn subscribe(&self, tenant_id: &str, collection: Collection) -> Result<SnapshotStream, DomainError> {
        let prefix = Self::collection_prefix(tenant_id, collection)?;
        // Receiver first so no change between the read and the subscribe is lost.
        let rx = self.bus.subscribe(&prefix);
        let initial = self.kv.scan(&prefix);
        self.metrics.inc_read();
        Ok(SnapshotStream::new(collection.path(tenant_id), initial, rx))
    }

    async fn write(&self, tenant_id: &str, collection: Collection, id: &str, record: Record) -> Result<(), DomainError> {
        let prefix = Self::collection_prefix(tenant_id, collection)?;
        validate_segment("record id", id)?;

        self.commit(&prefix, format!("{}{}", prefix, id), Change::Put(record))?;
        self.metrics.inc_write();
        Ok(())
    }

    async fn delete(&self, tenant_id: &str, collection: Collection, id: &str) -> Result<(), DomainError> {
        let prefix = Self::collection_prefix(tenant_id, collection)?;
        validate_segment("record id", id)?;

        if !self.commit(&prefix, format!("{}{}", prefix, id), Change::Remove)? {
            debug!("Delete of absent record {}{}", prefix, id);
        }
        self.metrics.inc_delete();
        Ok(())
    }

    async fn read_once(&self, tenant_id: &str, collection: Collection) -> Result<Snapshot, DomainError> {
        let prefix = Self::collection_prefix(tenant_id, collection)?;
        self.metrics.inc_read();
        Ok(self.kv.scan(&prefix))
    }
}
