use std::path::Path;

use crate::error::Result;
use crate::store::workspace::Workspace;

pub fn run(board_root: &Path) -> Result<()> {
    let ws = Workspace::init(board_root)?;
    tracing::info!(root = %ws.root().display(), "board initialized");
    eprintln!("Initialized .taskboard/ in {}", board_root.display());
    Ok(())
}
