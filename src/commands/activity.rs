use std::path::Path;

use crate::error::Result;
use crate::output::{self, Format};
use crate::store::workspace::Workspace;

/// Print the activity log, newest first.
pub fn list(board_root: &Path, limit: Option<usize>, format: Format) -> Result<()> {
    let ws = Workspace::open(board_root)?;
    ws.require_session()?;
    let store = ws.task_store();
    let limit = limit.unwrap_or(usize::MAX);
    output::print_activity(store.activity().iter().take(limit), format)
}

pub fn clear(board_root: &Path, format: Format) -> Result<()> {
    let ws = Workspace::open(board_root)?;
    ws.require_session()?;
    let _lock = ws.lock()?;

    let mut store = ws.task_store();
    let cleared = store.activity().len();
    store.clear_activity_log();

    match format {
        Format::Json => println!("{}", serde_json::json!({ "cleared": cleared })),
        _ => println!("Activity log cleared ({cleared} entries)"),
    }
    Ok(())
}
