//! Client-side key/value storage for the session (tokens, user data).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;

/// Key holding the access token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Key holding the logged-in user, serialized as JSON.
pub const USER_DATA_KEY: &str = "user_data";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key/value storage shared between the auth flow (writer) and the
/// gateway token lookup (reader).
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage; lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Storage persisted as a JSON object in a single file.
///
/// The file is read once on open and rewritten on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("varejo-storage-{}-{}", name, std::process::id()))
            .join("session.json")
    }

    #[test]
    fn memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(AUTH_TOKEN_KEY), None);

        storage.set(AUTH_TOKEN_KEY, "abc").unwrap();
        assert_eq!(storage.get(AUTH_TOKEN_KEY).as_deref(), Some("abc"));

        storage.set(AUTH_TOKEN_KEY, "def").unwrap();
        assert_eq!(storage.get(AUTH_TOKEN_KEY).as_deref(), Some("def"));

        storage.remove(AUTH_TOKEN_KEY).unwrap();
        assert_eq!(storage.get(AUTH_TOKEN_KEY), None);
    }

    #[test]
    fn file_storage_survives_reopen() {
        let path = temp_session_path("reopen");
        let _ = std::fs::remove_file(&path);

        {
            let storage = FileStorage::open(&path).unwrap();
            storage.set(AUTH_TOKEN_KEY, "token-1").unwrap();
            storage.set(REFRESH_TOKEN_KEY, "refresh-1").unwrap();
        }

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get(AUTH_TOKEN_KEY).as_deref(), Some("token-1"));
        assert_eq!(reopened.get(REFRESH_TOKEN_KEY).as_deref(), Some("refresh-1"));

        reopened.remove(AUTH_TOKEN_KEY).unwrap();
        let again = FileStorage::open(&path).unwrap();
        assert_eq!(again.get(AUTH_TOKEN_KEY), None);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn file_storage_rejects_corrupt_file() {
        let path = temp_session_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        let err = FileStorage::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
