use std::collections::BTreeMap;

use dashmap::DashMap;

use homecare_core::repositories::{Record, Snapshot};

/// Records keyed by full path, `tenants/{tenant}/{collection}/{id}`.
#[derive(Default)]
pub struct RecordKv {
    map: DashMap<String, Record>,
}

impl RecordKv {
    pub fn from_entries(entries: BTreeMap<String, Record>) -> Self {
        let map = DashMap::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        Self { map }
    }

    pub fn set(&self, key: String, value: Record) {
        self.map.insert(key, value);
    }

    pub fn del(&self, key: &str) -> bool {
        self.map.remove(key).is_some()
    }

    /// Records directly under `prefix`, keyed by the path remainder.
    /// `prefix` must end with `/` so `tenants/Jess/` never matches `tenants/Jess2/`.
    pub fn scan(&self, prefix: &str) -> Snapshot {
        self.map
            .iter()
            .filter_map(|r| {
                let rest = r.key().strip_prefix(prefix)?;
                if rest.is_empty() || rest.contains('/') {
                    return None;
                }
                Some((rest.to_string(), r.value().clone()))
            })
            .collect()
    }

    /// Full copy ordered by key, for persistence.
    pub fn entries(&self) -> BTreeMap<String, Record> {
        self.map
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }
}
