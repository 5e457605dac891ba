use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;

use homecare_core::repositories::Snapshot;

use super::metrics::StoreMetrics;

/// One broadcast channel per collection path, created on first subscribe.
pub struct SnapshotBus {
    channels: DashMap<String, broadcast::Sender<Arc<Snapshot>>>,
    capacity: usize,
    metrics: Arc<StoreMetrics>,
}

impl SnapshotBus {
    pub fn new(capacity: usize, metrics: Arc<StoreMetrics>) -> Self {
        Self {
            channels: DashMap::new(),
            capacity: capacity.max(1),
            metrics,
        }
    }

    pub fn publish(&self, topic: &str, snapshot: Snapshot) {
        if let Some(sender) = self.channels.get(topic) {
            // No receivers left is not an error; the next subscriber reads current state.
            let _ = sender.send(Arc::new(snapshot));
            self.metrics.inc_published();
            // A full queue means the slowest subscriber skips ahead on the next publish.
            if sender.len() >= self.capacity {
                self.metrics.inc_saturated();
            }
        }
    }

    pub fn subscribe(&self, topic: &str) -> broadcast::Receiver<Arc<Snapshot>> {
        let entry = self.channels.entry(topic.to_string()).or_insert_with(|| {
            let (tx, _rx) = broadcast::channel(self.capacity);
            tx
        });
        entry.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_queue_counts_saturated_publish() {
        let metrics = Arc::new(StoreMetrics::new());
        let bus = SnapshotBus::new(1, metrics.clone());

        bus.publish("tenants/Jess/clients/", Snapshot::new());
        assert_eq!(metrics.published(), 0);

        let _rx = bus.subscribe("tenants/Jess/clients/");
        bus.publish("tenants/Jess/clients/", Snapshot::new());
        assert_eq!(metrics.published(), 1);
        assert_eq!(metrics.saturated(), 1);
    }
}
