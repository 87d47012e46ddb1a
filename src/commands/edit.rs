use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Result, TaskboardError};
use crate::model::{Column, Priority, TaskUpdate};
use crate::output::{self, Format};
use crate::store::workspace::Workspace;

#[allow(clippy::too_many_arguments)]
pub fn run(
    board_root: &Path,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    due: Option<NaiveDate>,
    clear_due: bool,
    tags: Option<Vec<String>>,
    column: Option<Column>,
    format: Format,
) -> Result<()> {
    let ws = Workspace::open(board_root)?;
    ws.require_session()?;

    let due_date = if clear_due { Some(None) } else { due.map(Some) };
    let update = TaskUpdate {
        title,
        description,
        priority,
        due_date,
        tags,
        column,
    }
    .validate()?;

    let _lock = ws.lock()?;
    let mut store = ws.task_store();
    let id = Workspace::resolve_task_id(&store, id)?;
    if update.is_empty() {
        let task = store.get(&id).ok_or(TaskboardError::TaskNotFound(id.clone()))?;
        return output::print_task(task, format);
    }
    let task = store
        .update_task(&id, update)
        .ok_or(TaskboardError::TaskNotFound(id))?;
    output::print_task(&task, format)
}
