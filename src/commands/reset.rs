use std::path::Path;

use crate::error::Result;
use crate::output::Format;
use crate::store::workspace::Workspace;

pub fn run(board_root: &Path, format: Format) -> Result<()> {
    let ws = Workspace::open(board_root)?;
    ws.require_session()?;
    let _lock = ws.lock()?;

    let mut store = ws.task_store();
    let removed = store.tasks().len();
    store.reset_board();

    match format {
        Format::Json => println!("{}", serde_json::json!({ "reset": true, "removed": removed })),
        _ => println!("Board reset ({removed} tasks removed)"),
    }
    Ok(())
}
