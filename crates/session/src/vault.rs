//! Client-local persistence for the session record.
//!
//! The vault is a string key-value store with localStorage semantics:
//! synchronous, whole-value reads and writes, no transactions. Corrupt or
//! missing data is a degraded read, never a crash; callers decide whether
//! to surface it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use gridwatch_core::{DomainError, DomainResult};

/// Key under which the current identity is persisted.
pub const SESSION_KEY: &str = "traffic_dashboard_user";

/// Durable client-local string storage.
///
/// `remove` of an absent key succeeds; `read` of an absent key yields `None`.
pub trait StorageVault: Send + Sync {
    fn read(&self, key: &str) -> DomainResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> DomainResult<()>;
    fn remove(&self, key: &str) -> DomainResult<()>;
}

/// In-memory vault. The default for tests and for embedding without a disk.
#[derive(Debug, Default)]
pub struct MemoryVault {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageVault for MemoryVault {
    fn read(&self, key: &str) -> DomainResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| DomainError::storage("vault lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> DomainResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| DomainError::storage("vault lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| DomainError::storage("vault lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

/// File-backed vault: one JSON object per file, keys as members.
///
/// A missing file reads as empty. An unparseable file is a storage error on
/// read; writes replace the whole file, so the next successful write heals it.
#[derive(Debug)]
pub struct FileVault {
    path: PathBuf,
}

impl FileVault {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> DomainResult<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| DomainError::storage(format!("vault file corrupt: {e}"))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(DomainError::storage(format!("vault file unreadable: {e}"))),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) -> DomainResult<()> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| DomainError::storage(format!("vault serialize failed: {e}")))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| DomainError::storage(format!("vault file unwritable: {e}")))
    }
}

impl StorageVault for FileVault {
    fn read(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn write(&self, key: &str, value: &str) -> DomainResult<()> {
        // Tolerate a corrupt file on write: the write replaces it anyway.
        let mut entries = self.load().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        let mut entries = self.load().unwrap_or_default();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_vault_round_trips() {
        let vault = MemoryVault::new();
        vault.write(SESSION_KEY, "{}").unwrap();
        assert_eq!(vault.read(SESSION_KEY).unwrap().as_deref(), Some("{}"));
        vault.remove(SESSION_KEY).unwrap();
        assert_eq!(vault.read(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn memory_vault_remove_is_idempotent() {
        let vault = MemoryVault::new();
        vault.remove("absent").unwrap();
        vault.remove("absent").unwrap();
    }

    #[test]
    fn file_vault_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let vault = FileVault::new(dir.path().join("vault.json"));
        assert_eq!(vault.read(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn file_vault_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let vault = FileVault::new(dir.path().join("vault.json"));
        vault.write(SESSION_KEY, r#"{"id":"x"}"#).unwrap();
        assert_eq!(
            vault.read(SESSION_KEY).unwrap().as_deref(),
            Some(r#"{"id":"x"}"#)
        );
        vault.remove(SESSION_KEY).unwrap();
        assert_eq!(vault.read(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn file_vault_corrupt_file_is_a_storage_error_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.json");
        std::fs::write(&path, "not json at all").unwrap();
        let vault = FileVault::new(&path);
        assert!(matches!(
            vault.read(SESSION_KEY),
            Err(DomainError::Storage(_))
        ));
        // A successful write heals the file.
        vault.write(SESSION_KEY, "ok").unwrap();
        assert_eq!(vault.read(SESSION_KEY).unwrap().as_deref(), Some("ok"));
    }
}
