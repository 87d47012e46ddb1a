use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::error::{Result, TaskboardError};

/// Exclusive advisory lock on a file. Released on drop.
#[derive(Debug)]
pub struct BoardLock {
    file: File,
}

impl BoardLock {
    /// Fails immediately with [`TaskboardError::Locked`] if another process holds it.
    pub fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        file.try_lock_exclusive()
            .map_err(|_| TaskboardError::Locked(path.display().to_string()))?;

        Ok(Self { file })
    }
}

impl Drop for BoardLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
