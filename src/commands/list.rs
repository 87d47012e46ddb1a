use std::path::Path;

use crate::error::Result;
use crate::model::{Column, Priority};
use crate::output::{self, Format};
use crate::store::workspace::Workspace;

/// With a column, print that lane; otherwise print the whole board.
/// Each lane is filtered by `search` and `priority` and sorted by due date.
pub fn run(
    board_root: &Path,
    column: Option<Column>,
    search: Option<String>,
    priority: Option<Priority>,
    format: Format,
) -> Result<()> {
    let ws = Workspace::open(board_root)?;
    ws.require_session()?;
    let store = ws.task_store();
    let search = search.unwrap_or_default();

    match column {
        Some(column) => {
            let tasks = store.filtered_and_sorted(column, &search, priority);
            output::print_tasks(&tasks, format)
        }
        None => {
            let lanes: Vec<_> = Column::ALL
                .iter()
                .map(|&c| (c, store.filtered_and_sorted(c, &search, priority)))
                .collect();
            output::print_board(&lanes, format)
        }
    }
}
