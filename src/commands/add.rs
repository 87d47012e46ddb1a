use std::path::Path;

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::{Column, NewTask, Priority};
use crate::output::{self, Format};
use crate::store::workspace::Workspace;

#[allow(clippy::too_many_arguments)]
pub fn run(
    board_root: &Path,
    title: String,
    description: Option<String>,
    priority: Option<Priority>,
    due: Option<NaiveDate>,
    tags: Vec<String>,
    column: Option<Column>,
    format: Format,
) -> Result<()> {
    let ws = Workspace::open(board_root)?;
    ws.require_session()?;

    let data = NewTask {
        title,
        description,
        priority,
        due_date: due,
        tags,
        column,
    }
    .validate()?;

    let _lock = ws.lock()?;
    let mut store = ws.task_store();
    let task = store.add_task(data);
    output::print_task(&task, format)
}
