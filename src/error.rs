use thiserror::Error;

use crate::auth::AuthFailure;

#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error("not a taskboard directory (run `taskboard init` first)")]
    NotInitialized,

    #[error("taskboard already initialized in this directory")]
    AlreadyInitialized,

    #[error("not logged in (run `taskboard login` first)")]
    NotAuthenticated,

    #[error("{0}")]
    LoginFailed(AuthFailure),

    #[error("task {0} not found")]
    TaskNotFound(String),

    #[error("task id prefix '{0}' is ambiguous; matches: {1}")]
    TaskIdAmbiguous(String, String),

    #[error("invalid task id '{0}': {1}")]
    InvalidTaskId(String, String),

    #[error("{0}")]
    InvalidTitle(String),

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("storage quota exceeded while writing '{0}'")]
    QuotaExceeded(String),

    #[error("locked by another process: {0}")]
    Locked(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaskboardError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotInitialized => "not_initialized",
            Self::AlreadyInitialized => "already_initialized",
            Self::NotAuthenticated => "not_authenticated",
            Self::LoginFailed(failure) => failure.code(),
            Self::TaskNotFound(_) => "task_not_found",
            Self::TaskIdAmbiguous(_, _) => "task_id_ambiguous",
            Self::InvalidTaskId(_, _) => "invalid_task_id",
            Self::InvalidTitle(_) => "invalid_title",
            Self::InvalidKey(_) => "invalid_key",
            Self::QuotaExceeded(_) => "quota_exceeded",
            Self::Locked(_) => "locked",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskboardError>;
