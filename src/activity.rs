use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task_id;

/// Maximum number of entries the activity log retains.
pub const ACTIVITY_LOG_CAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Created,
    Edited,
    Moved,
    Deleted,
    Reset,
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => f.pad("created"),
            Self::Edited => f.pad("edited"),
            Self::Moved => f.pad("moved"),
            Self::Deleted => f.pad("deleted"),
            Self::Reset => f.pad("reset"),
        }
    }
}

/// Immutable record of one task mutation. `task_title` is a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    pub action: ActivityAction,
    pub task_title: String,
    #[serde(default)]
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(action: ActivityAction, task_title: &str, details: impl Into<String>) -> Self {
        Self {
            id: task_id::generate(),
            action,
            task_title: task_title.to_string(),
            details: details.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded newest-first log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted entries (already newest-first), keeping at most the cap.
    pub fn from_entries(entries: Vec<ActivityEntry>) -> Self {
        let mut entries: VecDeque<ActivityEntry> = entries.into();
        entries.truncate(ACTIVITY_LOG_CAP);
        Self { entries }
    }

    /// Insert at the front, evicting the oldest entry past the cap.
    pub fn push(&mut self, entry: ActivityEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(ACTIVITY_LOG_CAP);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn newest(&self) -> Option<&ActivityEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<ActivityEntry> {
        self.entries.iter().cloned().collect()
    }
}
