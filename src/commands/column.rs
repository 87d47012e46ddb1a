use std::path::Path;

use crate::drag::DragInteraction;
use crate::error::{Result, TaskboardError};
use crate::model::Column;
use crate::output::{self, Format};
use crate::store::workspace::Workspace;

/// Move a task directly to `column`.
pub fn move_to(board_root: &Path, id: &str, column: Column, format: Format) -> Result<()> {
    let ws = Workspace::open(board_root)?;
    ws.require_session()?;
    let _lock = ws.lock()?;

    let mut store = ws.task_store();
    let id = Workspace::resolve_task_id(&store, id)?;
    let task = store
        .move_task(&id, column)
        .ok_or(TaskboardError::TaskNotFound(id))?;
    output::print_task(&task, format)
}

/// Replay a drag gesture: pick the task up, hover `column`, then drop
/// there (or cancel).
pub fn drag(
    board_root: &Path,
    id: &str,
    column: Column,
    cancel: bool,
    format: Format,
) -> Result<()> {
    let ws = Workspace::open(board_root)?;
    ws.require_session()?;
    let _lock = ws.lock()?;

    let mut store = ws.task_store();
    let id = Workspace::resolve_task_id(&store, id)?;
    let task = store
        .get(&id)
        .cloned()
        .ok_or_else(|| TaskboardError::TaskNotFound(id.clone()))?;

    let mut gesture = DragInteraction::new();
    gesture.start_drag(task);
    gesture.drag_over_column(column);
    if cancel {
        gesture.end_drag();
    } else if gesture.drop(column, &mut store).is_none() {
        tracing::debug!(%id, %column, "drop did not move the task");
    }

    let task = store.get(&id).ok_or(TaskboardError::TaskNotFound(id.clone()))?;
    output::print_task(task, format)
}
