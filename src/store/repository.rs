use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::activity::ActivityEntry;
use crate::error::Result;
use crate::model::Task;
use crate::store::kv::KeyValueStore;

pub const TASKS_KEY: &str = "taskboard-tasks";
pub const ACTIVITY_KEY: &str = "taskboard-activity";

/// Typed persistence for the board. Loads never fail: unreadable data
/// degrades to an empty list.
pub trait TaskRepository {
    fn load_tasks(&self) -> Vec<Task>;
    fn save_tasks(&mut self, tasks: &[Task]) -> Result<()>;
    fn clear_tasks(&mut self) -> Result<()>;
    fn load_activity(&self) -> Vec<ActivityEntry>;
    fn save_activity(&mut self, entries: &[ActivityEntry]) -> Result<()>;
    fn clear_activity(&mut self) -> Result<()>;
}

/// [`TaskRepository`] over any [`KeyValueStore`], one JSON array per key.
pub struct KvRepository<K> {
    kv: K,
}

impl<K: KeyValueStore> KvRepository<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    pub fn into_inner(self) -> K {
        self.kv
    }

    fn load_array<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored value, using empty list");
                return Vec::new();
            }
        };
        parse_array(key, &raw)
    }

    fn save_array<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.kv.set(key, &json)
    }
}

fn parse_array<T: DeserializeOwned>(key: &str, raw: &str) -> Vec<T> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value is not valid JSON, resetting to empty list");
            return Vec::new();
        }
    };
    let serde_json::Value::Array(records) = value else {
        tracing::warn!(key, "stored value is not an array, resetting to empty list");
        return Vec::new();
    };

    let total = records.len();
    let items: Vec<T> = records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!(key, error = %e, "skipping malformed record");
                None
            }
        })
        .collect();
    let skipped = total - items.len();
    if skipped > 0 {
        tracing::warn!(key, skipped, kept = items.len(), "skipped malformed stored records");
    }
    items
}

impl<K: KeyValueStore> TaskRepository for KvRepository<K> {
    fn load_tasks(&self) -> Vec<Task> {
        self.load_array(TASKS_KEY)
    }

    fn save_tasks(&mut self, tasks: &[Task]) -> Result<()> {
        self.save_array(TASKS_KEY, tasks)
    }

    fn clear_tasks(&mut self) -> Result<()> {
        self.kv.remove(TASKS_KEY)
    }

    fn load_activity(&self) -> Vec<ActivityEntry> {
        self.load_array(ACTIVITY_KEY)
    }

    fn save_activity(&mut self, entries: &[ActivityEntry]) -> Result<()> {
        self.save_array(ACTIVITY_KEY, entries)
    }

    fn clear_activity(&mut self) -> Result<()> {
        self.kv.remove(ACTIVITY_KEY)
    }
}
