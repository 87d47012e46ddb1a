use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::SessionGate;
use crate::config::{self, BoardConfig};
use crate::error::{Result, TaskboardError};
use crate::store::kv::FileKv;
use crate::store::lock::BoardLock;
use crate::store::repository::KvRepository;
use crate::store::task_store::TaskStore;
use crate::task_id;

pub const BOARD_DIR: &str = ".taskboard";

pub type FileTaskStore = TaskStore<KvRepository<FileKv>>;
pub type FileSessionGate = SessionGate<FileKv, FileKv>;

/// An initialized board directory.
///
/// On-disk layout under `.taskboard/`:
///   - `config.json` — version and optional credential
///   - `store/`      — durable key-value store (tasks, activity, remembered session)
///   - `board.lock`  — held by mutating commands
pub struct Workspace {
    root: PathBuf,
    config: BoardConfig,
}

impl Workspace {
    pub fn init(board_root: &Path) -> Result<Self> {
        let dir = board_root.join(BOARD_DIR);
        if BoardConfig::path(&dir).exists() {
            return Err(TaskboardError::AlreadyInitialized);
        }
        fs::create_dir_all(dir.join("store"))?;
        let config = BoardConfig::default();
        config.save(&dir)?;
        Ok(Self {
            root: board_root.to_path_buf(),
            config,
        })
    }

    pub fn open(board_root: &Path) -> Result<Self> {
        let dir = board_root.join(BOARD_DIR);
        if !BoardConfig::path(&dir).exists() {
            return Err(TaskboardError::NotInitialized);
        }
        let config = BoardConfig::load(&dir)?;
        Ok(Self {
            root: board_root.to_path_buf(),
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn board_dir(&self) -> PathBuf {
        self.root.join(BOARD_DIR)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    fn durable_kv(&self) -> FileKv {
        FileKv::open(self.board_dir().join("store"))
    }

    pub fn lock(&self) -> Result<BoardLock> {
        BoardLock::acquire(&self.board_dir().join("board.lock"))
    }

    pub fn session_gate(&self) -> FileSessionGate {
        SessionGate::open(
            self.durable_kv(),
            FileKv::open(config::transient_session_dir(&self.root)),
            self.config.resolve_credentials(),
        )
    }

    /// Route guard: fails unless a session is stored.
    pub fn require_session(&self) -> Result<()> {
        if self.session_gate().is_authenticated() {
            Ok(())
        } else {
            Err(TaskboardError::NotAuthenticated)
        }
    }

    pub fn task_store(&self) -> FileTaskStore {
        TaskStore::open(KvRepository::new(self.durable_kv()))
    }

    /// Resolve a user-typed id or id prefix against the current tasks.
    pub fn resolve_task_id(store: &FileTaskStore, input: &str) -> Result<String> {
        task_id::resolve(input, store.tasks().iter().map(|t| t.id.as_str()))
    }
}

/// Walk up from the current directory to find the board root.
pub fn find_board_root() -> Result<PathBuf> {
    let mut dir = std::env::current_dir()?;
    loop {
        if dir.join(BOARD_DIR).join(config::CONFIG_FILE).exists() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(TaskboardError::NotInitialized);
        }
    }
}
