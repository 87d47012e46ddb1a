use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::auth::Credentials;
use crate::error::Result;

pub const CONFIG_FILE: &str = "config.json";
pub const EMAIL_ENV: &str = "TASKBOARD_AUTH_EMAIL";
pub const PASSWORD_ENV: &str = "TASKBOARD_AUTH_PASSWORD";
pub const SESSION_DIR_ENV: &str = "TASKBOARD_SESSION_DIR";

/// Contents of `.taskboard/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardConfig {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            version: 1,
            credentials: None,
        }
    }
}

impl BoardConfig {
    pub fn path(board_dir: &Path) -> PathBuf {
        board_dir.join(CONFIG_FILE)
    }

    pub fn load(board_dir: &Path) -> Result<Self> {
        let data = fs::read_to_string(Self::path(board_dir))?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, board_dir: &Path) -> Result<()> {
        fs::write(Self::path(board_dir), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The credential the login gate checks against. Environment
    /// variables take precedence over the config file; both must be set.
    pub fn resolve_credentials(&self) -> Option<Credentials> {
        credentials_from_env().or_else(|| self.credentials.clone())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

pub fn credentials_from_env() -> Option<Credentials> {
    Some(Credentials {
        email: non_empty_env(EMAIL_ENV)?,
        password: non_empty_env(PASSWORD_ENV)?,
    })
}

/// Directory backing the transient session store for a board.
///
/// Lives under the OS temp dir so it does not outlive the machine
/// session. Each board gets its own subdirectory derived from its path.
pub fn transient_session_dir(board_root: &Path) -> PathBuf {
    if let Some(dir) = non_empty_env(SESSION_DIR_ENV) {
        return PathBuf::from(dir);
    }
    let canonical = board_root
        .canonicalize()
        .unwrap_or_else(|_| board_root.to_path_buf());
    let scope = uuid::Uuid::new_v5(
        &uuid::Uuid::NAMESPACE_URL,
        canonical.to_string_lossy().as_bytes(),
    );
    std::env::temp_dir()
        .join("taskboard-sessions")
        .join(scope.simple().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    // Env-var tests must not run concurrently.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn file_credentials() -> Credentials {
        Credentials {
            email: "file@demo.com".into(),
            password: "from-file".into(),
        }
    }

    #[test]
    fn config_round_trips_on_disk() {
        let dir = tempdir().unwrap();
        let config = BoardConfig {
            version: 1,
            credentials: Some(file_credentials()),
        };
        config.save(dir.path()).unwrap();
        assert_eq!(BoardConfig::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn default_config_omits_credentials() {
        let json = serde_json::to_string(&BoardConfig::default()).unwrap();
        assert_eq!(json, r#"{"version":1}"#);
    }

    #[test]
    fn env_credentials_override_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let config = BoardConfig {
            version: 1,
            credentials: Some(file_credentials()),
        };

        unsafe {
            std::env::remove_var(EMAIL_ENV);
            std::env::remove_var(PASSWORD_ENV);
        }
        assert_eq!(config.resolve_credentials(), Some(file_credentials()));

        unsafe {
            std::env::set_var(EMAIL_ENV, "env@demo.com");
            std::env::set_var(PASSWORD_ENV, "from-env");
        }
        let resolved = config.resolve_credentials().unwrap();
        assert_eq!(resolved.email, "env@demo.com");

        // A half-configured environment does not count.
        unsafe { std::env::set_var(PASSWORD_ENV, "") };
        assert_eq!(config.resolve_credentials(), Some(file_credentials()));

        unsafe {
            std::env::remove_var(EMAIL_ENV);
            std::env::remove_var(PASSWORD_ENV);
        }
        assert_eq!(BoardConfig::default().resolve_credentials(), None);
    }

    #[test]
    fn transient_dir_is_stable_per_board() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe { std::env::remove_var(SESSION_DIR_ENV) };
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        assert_eq!(
            transient_session_dir(a.path()),
            transient_session_dir(a.path())
        );
        assert_ne!(
            transient_session_dir(a.path()),
            transient_session_dir(b.path())
        );
        assert!(transient_session_dir(a.path()).starts_with(std::env::temp_dir()));
    }
}
