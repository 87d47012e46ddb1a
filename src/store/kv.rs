use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{Result, TaskboardError};

/// A string-keyed, string-valued storage medium.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TaskboardError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Durable medium: one file per key under a directory.
pub struct FileKv {
    root: PathBuf,
}

impl FileKv {
    /// The directory is created lazily on first write.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        // Readers only ever see the old value or the new one.
        let staging = self.root.join(format!(".{key}.tmp"));
        fs::write(&staging, value)?;
        if let Err(e) = fs::rename(&staging, &path) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-process medium, optionally capped at a total byte size.
#[derive(Debug, Default, Clone)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes that would push keys plus values past `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota
            && self.used_without(key) + key.len() + value.len() > quota
        {
            return Err(TaskboardError::QuotaExceeded(key.to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_kv_set_get_remove() {
        let dir = tempdir().unwrap();
        let mut kv = FileKv::open(dir.path().join("store"));
        assert_eq!(kv.get("user").unwrap(), None);

        kv.set("user", r#"{"email":"a@b.c"}"#).unwrap();
        assert!(dir.path().join("store").join("user").exists());
        assert_eq!(kv.get("user").unwrap().as_deref(), Some(r#"{"email":"a@b.c"}"#));

        kv.remove("user").unwrap();
        assert_eq!(kv.get("user").unwrap(), None);
        kv.remove("user").unwrap();
    }

    #[test]
    fn file_kv_overwrite_replaces_whole_value() {
        let dir = tempdir().unwrap();
        let mut kv = FileKv::open(dir.path());
        kv.set("user", r#"{"email":"a-much-longer-address@example.com"}"#)
            .unwrap();
        kv.set("user", r#"{"email":"a@b.c"}"#).unwrap();
        assert_eq!(kv.get("user").unwrap().as_deref(), Some(r#"{"email":"a@b.c"}"#));

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["user"]);
    }

    #[test]
    fn file_kv_failed_write_leaves_no_staging_file() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("user")).unwrap();
        let mut kv = FileKv::open(dir.path());
        assert!(kv.set("user", "x").is_err());
        assert!(!dir.path().join(".user.tmp").exists());
    }

    #[test]
    fn file_kv_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let mut kv = FileKv::open(dir.path());
        assert!(matches!(
            kv.set("../escape", "x"),
            Err(TaskboardError::InvalidKey(_))
        ));
        assert!(kv.get("").is_err());
    }

    #[test]
    fn memory_kv_enforces_quota() {
        let mut kv = MemoryKv::with_quota(16);
        kv.set("k", "12345").unwrap();
        // Overwriting the same key only counts the new value.
        kv.set("k", "123456789").unwrap();
        assert!(matches!(
            kv.set("other", "1234567890"),
            Err(TaskboardError::QuotaExceeded(key)) if key == "other"
        ));
        assert_eq!(kv.get("other").unwrap(), None);
        assert_eq!(kv.len(), 1);
    }
}
