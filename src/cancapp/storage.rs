//! Durable key-value storage for session material.
//!
//! The console keeps the bearer token, refresh token, expiry and serialized
//! identity under fixed keys. `FileStorage` persists them as a small JSON
//! object with owner-only permissions; `MemoryStorage` backs tests and
//! embedders that manage persistence themselves. Values are stored verbatim,
//! so callers must never log what they read from here.

use super::error::{Error, Result};
use std::{
    collections::BTreeMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, warn};

pub const TOKEN_KEY: &str = "adminToken";
pub const REFRESH_TOKEN_KEY: &str = "adminRefreshToken";
pub const TOKEN_EXPIRY_KEY: &str = "adminTokenExpiry";
pub const USER_KEY: &str = "adminUser";

/// Every key the session owns, in the order they are written.
pub const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, REFRESH_TOKEN_KEY, TOKEN_EXPIRY_KEY, USER_KEY];

pub trait Storage: Send + Sync {
    /// # Errors
    /// Returns `Error::Storage` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// # Errors
    /// Returns `Error::Storage` if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns `Error::Storage` if the backing store cannot be updated.
    fn remove(&self, key: &str) -> Result<()>;

    /// Drops every session key.
    ///
    /// # Errors
    /// Returns `Error::Storage` if the backing store cannot be updated.
    fn clear(&self) -> Result<()> {
        for key in SESSION_KEYS {
            self.remove(key)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::Storage("memory storage lock poisoned".to_string()))
    }

    /// Number of stored keys.
    ///
    /// # Errors
    /// Returns `Error::Storage` if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }

    /// # Errors
    /// Returns `Error::Storage` if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.entries()?.is_empty())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// JSON-file storage; every write replaces the file atomically.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `<config dir>/cancapp-admin/session.json`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("session.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => {
                return Err(Error::Storage(format!(
                    "Failed to read {}: {err}",
                    self.path.display()
                )))
            }
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        // Unreadable contents are discarded; the next write replaces them.
        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(path = %self.path.display(), "ignoring corrupt storage file: {err}");
                Ok(BTreeMap::new())
            }
        }
    }

    fn delete_file(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::Storage(format!(
                "Failed to remove {}: {err}",
                self.path.display()
            ))),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if entries.is_empty() {
            return self.delete_file();
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                Error::Storage(format!("Failed to create {}: {err}", parent.display()))
            })?;
        }

        let payload = serde_json::to_vec_pretty(entries)
            .map_err(|err| Error::Storage(format!("Failed to encode storage: {err}")))?;

        let tmp_path = self.path.with_extension("json.tmp");
        write_private(&tmp_path, &payload)
            .and_then(|()| fs::rename(&tmp_path, &self.path))
            .map_err(|err| {
                let _ = fs::remove_file(&tmp_path);
                Error::Storage(format!("Failed to write {}: {err}", self.path.display()))
            })?;

        debug!(path = %self.path.display(), keys = entries.len(), "storage written");
        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Storage("file storage lock poisoned".to_string()))?;
        let mut entries = self.read_entries()?;
        if apply(&mut entries) {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Storage("file storage lock poisoned".to_string()))?;
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| entries.remove(key).is_some())
    }

    /// Deletes the file without reading it, so a corrupt file still goes away.
    fn clear(&self) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Storage("file storage lock poisoned".to_string()))?;
        self.delete_file()?;
        debug!(path = %self.path.display(), "storage cleared");
        Ok(())
    }
}

#[cfg(unix)]
fn write_private(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(payload)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(payload)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::TempDir;

    #[test]
    fn memory_storage_round_trips_and_removes() -> Result<()> {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(TOKEN_KEY)?, None);

        storage.set(TOKEN_KEY, "abc")?;
        assert_eq!(storage.get(TOKEN_KEY)?, Some("abc".to_string()));

        storage.remove(TOKEN_KEY)?;
        storage.remove(TOKEN_KEY)?;
        assert!(storage.is_empty()?);
        Ok(())
    }

    #[test]
    fn file_storage_missing_file_reads_empty() -> Result<()> {
        let dir = TempDir::new()?;
        let storage = FileStorage::new(dir.path().join("missing.json"));
        assert_eq!(storage.get(USER_KEY)?, None);
        Ok(())
    }

    #[test]
    fn file_storage_survives_reopen() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("session.json");

        FileStorage::new(&path).set(TOKEN_KEY, "persisted")?;

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY)?, Some("persisted".to_string()));
        Ok(())
    }

    #[test]
    fn file_storage_deletes_file_when_last_key_is_removed() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("session.json");
        let storage = FileStorage::new(&path);

        storage.set(TOKEN_KEY, "a")?;
        storage.set(USER_KEY, "{}")?;
        storage.remove(TOKEN_KEY)?;
        assert!(path.exists());
        assert_eq!(storage.get(TOKEN_KEY)?, None);

        storage.remove(USER_KEY)?;
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn file_storage_treats_corrupt_file_as_empty() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"adminToken": "stale", "#)?;

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get(TOKEN_KEY)?, None);

        storage.set(TOKEN_KEY, "fresh")?;
        assert_eq!(storage.get(TOKEN_KEY)?, Some("fresh".to_string()));
        assert!(!fs::read_to_string(&path)?.contains("stale"));
        Ok(())
    }

    #[test]
    fn file_storage_clear_deletes_corrupt_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"adminToken": "stale", "#)?;

        let storage = FileStorage::new(&path);
        storage.clear()?;
        assert!(!path.exists());

        // Clearing twice is harmless.
        storage.clear()?;
        Ok(())
    }

    #[test]
    fn memory_storage_clear_drops_session_keys() -> Result<()> {
        let storage = MemoryStorage::new();
        for key in SESSION_KEYS {
            storage.set(key, "value")?;
        }
        storage.clear()?;
        assert!(storage.is_empty()?);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn file_storage_is_owner_only() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new()?;
        let path = dir.path().join("session.json");
        FileStorage::new(&path).set(TOKEN_KEY, "secret")?;

        let mode = fs::metadata(&path)?.permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        Ok(())
    }
}
