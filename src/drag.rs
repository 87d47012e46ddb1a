//! Transient drag-and-drop interaction state.
//!
//! The state is never persisted and is reset after every gesture. A drop
//! is the only transition that touches the board, and it goes through
//! [`TaskStore::move_task`].

use crate::model::{Column, Task};
use crate::store::repository::TaskRepository;
use crate::store::task_store::TaskStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Task),
    DraggingOverColumn(Task, Column),
}

#[derive(Debug, Default)]
pub struct DragInteraction {
    state: DragState,
}

impl DragInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn dragged_task(&self) -> Option<&Task> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(task) | DragState::DraggingOverColumn(task, _) => Some(task),
        }
    }

    pub fn hovered_column(&self) -> Option<Column> {
        match self.state {
            DragState::DraggingOverColumn(_, column) => Some(column),
            _ => None,
        }
    }

    /// Pick up `task`. Starting a new drag replaces any gesture in progress.
    pub fn start_drag(&mut self, task: Task) {
        self.state = DragState::Dragging(task);
    }

    /// Record the hovered column. Ignored when nothing is being dragged.
    pub fn drag_over_column(&mut self, column: Column) {
        self.state = match std::mem::take(&mut self.state) {
            DragState::Idle => DragState::Idle,
            DragState::Dragging(task) | DragState::DraggingOverColumn(task, _) => {
                DragState::DraggingOverColumn(task, column)
            }
        };
    }

    pub fn drag_leave_column(&mut self) {
        if let DragState::DraggingOverColumn(task, _) = std::mem::take(&mut self.state) {
            self.state = DragState::Dragging(task);
        }
    }

    /// Drop onto `column`. Moves the dragged task when its column differs
    /// and returns the moved task. Always ends the gesture.
    pub fn drop<R: TaskRepository>(
        &mut self,
        column: Column,
        store: &mut TaskStore<R>,
    ) -> Option<Task> {
        let task = match std::mem::take(&mut self.state) {
            DragState::Idle => return None,
            DragState::Dragging(task) | DragState::DraggingOverColumn(task, _) => task,
        };
        if task.column == column {
            tracing::debug!(id = %task.id, %column, "dropped onto own column");
            return None;
        }
        store.move_task(&task.id, column)
    }

    /// Cancel the gesture without touching the board.
    pub fn end_drag(&mut self) {
        self.state = DragState::Idle;
    }
}
