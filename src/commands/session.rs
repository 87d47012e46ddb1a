use std::path::Path;

use crate::auth::LoginResult;
use crate::error::{Result, TaskboardError};
use crate::output::{self, Format};
use crate::store::workspace::Workspace;

pub fn login(
    board_root: &Path,
    email: &str,
    password: &str,
    remember: bool,
    format: Format,
) -> Result<()> {
    let ws = Workspace::open(board_root)?;
    let _lock = ws.lock()?;
    let mut gate = ws.session_gate();
    match gate.login(email, password, remember) {
        LoginResult::Success(session) => {
            output::print_session(Some(&session), gate.is_remembered(), format)
        }
        LoginResult::Failure(failure) => Err(TaskboardError::LoginFailed(failure)),
    }
}

pub fn logout(board_root: &Path, format: Format) -> Result<()> {
    let ws = Workspace::open(board_root)?;
    let _lock = ws.lock()?;
    let mut gate = ws.session_gate();
    gate.logout();
    output::print_session(None, false, format)
}

pub fn whoami(board_root: &Path, format: Format) -> Result<()> {
    let ws = Workspace::open(board_root)?;
    let gate = ws.session_gate();
    output::print_session(gate.session(), gate.is_remembered(), format)
}
