use std::cmp::Ordering;

use chrono::Utc;

use crate::activity::{ActivityAction, ActivityEntry, ActivityLog};
use crate::model::{Column, NewTask, Priority, Task, TaskUpdate};
use crate::store::repository::TaskRepository;
use crate::task_id;

/// Owns the canonical task list and activity log.
///
/// Every mutation writes the full list (and log) back through the
/// repository. Write failures are logged and otherwise ignored; the
/// in-memory state is authoritative for the lifetime of the store.
/// Unknown ids are no-ops that return `None`.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    activity: ActivityLog,
}

impl<R: TaskRepository> TaskStore<R> {
    pub fn open(repo: R) -> Self {
        let tasks = repo.load_tasks();
        let activity = ActivityLog::from_entries(repo.load_activity());
        tracing::debug!(
            tasks = tasks.len(),
            activity = activity.len(),
            "task store hydrated"
        );
        Self {
            repo,
            tasks,
            activity,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Tasks in `column`, in insertion order.
    pub fn tasks_by_column(&self, column: Column) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.column == column).collect()
    }

    /// Create a task. No validation happens here; see [`NewTask::validate`].
    pub fn add_task(&mut self, data: NewTask) -> Task {
        let task = Task {
            id: task_id::generate(),
            title: data.title.trim().to_string(),
            description: data
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            priority: data.priority.unwrap_or_default(),
            due_date: data.due_date,
            tags: data.tags,
            column: data.column.unwrap_or_default(),
            created_at: Utc::now(),
        };
        self.tasks.push(task.clone());
        self.record(
            ActivityAction::Created,
            &task.title,
            format!("Added to {}", task.column),
        );
        self.persist_tasks();
        task
    }

    /// Merge `updates` onto the task. The log entry carries the pre-update title.
    pub fn update_task(&mut self, id: &str, updates: TaskUpdate) -> Option<Task> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(id, "update ignored: unknown task");
            return None;
        };
        let previous_title = task.title.clone();
        updates.apply(task);
        let updated = task.clone();

        self.record(ActivityAction::Edited, &previous_title, "");
        self.persist_tasks();
        Some(updated)
    }

    pub fn delete_task(&mut self, id: &str) -> Option<Task> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            tracing::debug!(id, "delete ignored: unknown task");
            return None;
        };
        let removed = self.tasks.remove(pos);
        self.record(ActivityAction::Deleted, &removed.title, "");
        self.persist_tasks();
        Some(removed)
    }

    /// Move a task between columns. Moving to the current column changes
    /// nothing and logs nothing; the task is still returned.
    pub fn move_task(&mut self, id: &str, new_column: Column) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        if task.column == new_column {
            return Some(task.clone());
        }
        let old_column = task.column;
        task.column = new_column;
        let moved = task.clone();

        self.record(
            ActivityAction::Moved,
            &moved.title,
            format!("{old_column} → {new_column}"),
        );
        self.persist_tasks();
        Some(moved)
    }

    /// Remove every task and drop the stored list.
    pub fn reset_board(&mut self) {
        self.record(ActivityAction::Reset, "All tasks", "Board was reset");
        self.tasks.clear();
        if let Err(e) = self.repo.clear_tasks() {
            tracing::warn!(error = %e, "failed to clear stored tasks");
        }
    }

    pub fn clear_activity_log(&mut self) {
        self.activity.clear();
        if let Err(e) = self.repo.clear_activity() {
            tracing::warn!(error = %e, "failed to clear stored activity log");
        }
    }

    /// Tasks in `column` whose title contains `search_query` (case-insensitive)
    /// and whose priority matches `priority` when given, ordered by due date
    /// with undated tasks last. The sort is stable.
    pub fn filtered_and_sorted(
        &self,
        column: Column,
        search_query: &str,
        priority: Option<Priority>,
    ) -> Vec<&Task> {
        let needle = search_query.to_lowercase();
        let mut out: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.column == column)
            .filter(|t| t.title.to_lowercase().contains(&needle))
            .filter(|t| priority.is_none_or(|p| t.priority == p))
            .collect();
        out.sort_by(|a, b| match (a.due_date, b.due_date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        });
        out
    }

    fn record(&mut self, action: ActivityAction, task_title: &str, details: impl Into<String>) {
        self.activity
            .push(ActivityEntry::new(action, task_title, details));
        if let Err(e) = self.repo.save_activity(&self.activity.to_vec()) {
            tracing::warn!(error = %e, "failed to persist activity log");
        }
    }

    fn persist_tasks(&mut self) {
        if let Err(e) = self.repo.save_tasks(&self.tasks) {
            tracing::warn!(error = %e, "failed to persist tasks; changes are kept in memory only");
        }
    }
}
