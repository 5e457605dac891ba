use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct StoreMetrics {
    pub writes_total: AtomicU64,
    pub deletes_total: AtomicU64,
    pub reads_total: AtomicU64,
    pub snapshots_published_total: AtomicU64,
    pub saturated_publishes_total: AtomicU64,
    pub persist_failures_total: AtomicU64,
}

impl StoreMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_write(&self) {
        self.writes_total.fetch_add(1, Ordering::Relaxed);
    }
    pub fn inc_delete(&self) {
        self.deletes_total.fetch_add(1, Ordering::Relaxed);
    }
    pub fn inc_read(&self) {
        self.reads_total.fetch_add(1, Ordering::Relaxed);
    }
    pub fn inc_published(&self) {
        self.snapshots_published_total.fetch_add(1, Ordering::Relaxed);
    }
    pub fn inc_saturated(&self) {
        self.saturated_publishes_total.fetch_add(1, Ordering::Relaxed);
    }
    pub fn inc_persist_failure(&self) {
        self.persist_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn writes(&self) -> u64 {
        self.writes_total.load(Ordering::Relaxed)
    }
    pub fn deletes(&self) -> u64 {
        self.deletes_total.load(Ordering::Relaxed)
    }
    pub fn reads(&self) -> u64 {
        self.reads_total.load(Ordering::Relaxed)
    }
    pub fn published(&self) -> u64 {
        self.snapshots_published_total.load(Ordering::Relaxed)
    }
    pub fn saturated(&self) -> u64 {
        self.saturated_publishes_total.load(Ordering::Relaxed)
    }
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures_total.load(Ordering::Relaxed)
    }
}
