//! Key-value storage for the persisted session record.
//!
//! Mirrors browser local storage: string keys, string (JSON) values, no
//! versioning.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{FoodShareError, Result};

pub trait SessionStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store. Used in tests and when no session directory is set.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
///
/// The directory is created on first save.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(FoodShareError::Validation(format!(
                "invalid session key: {:?}",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, value)?;
        debug!(path = %path.display(), "Session record written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("foodshare-store-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_memory_store_crud() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load("foodshare_user").unwrap(), None);

        store.save("foodshare_user", "{}").unwrap();
        assert_eq!(store.load("foodshare_user").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.len(), 1);

        store.remove("foodshare_user").unwrap();
        store.remove("foodshare_user").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_crud() {
        let dir = scratch_dir();
        let store = FileSessionStore::new(&dir);

        assert_eq!(store.load("foodshare_user").unwrap(), None);

        store.save("foodshare_user", r#"{"name":"x"}"#).unwrap();
        assert!(dir.join("foodshare_user.json").exists());
        assert_eq!(
            store.load("foodshare_user").unwrap().as_deref(),
            Some(r#"{"name":"x"}"#)
        );

        store.remove("foodshare_user").unwrap();
        assert_eq!(store.load("foodshare_user").unwrap(), None);
        // Missing key is fine
        store.remove("foodshare_user").unwrap();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let store = FileSessionStore::new(scratch_dir());
        assert!(store.load("../etc/passwd").is_err());
        assert!(store.save("", "x").is_err());
    }
}
