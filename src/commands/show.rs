use std::path::Path;

use crate::error::{Result, TaskboardError};
use crate::output::{self, Format};
use crate::store::workspace::Workspace;

pub fn run(board_root: &Path, id: &str, format: Format) -> Result<()> {
    let ws = Workspace::open(board_root)?;
    ws.require_session()?;
    let store = ws.task_store();
    let id = Workspace::resolve_task_id(&store, id)?;
    let task = store.get(&id).ok_or(TaskboardError::TaskNotFound(id.clone()))?;
    output::print_task(task, format)
}
