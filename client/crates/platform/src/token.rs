//! Token Vault
//!
//! Owns the bearer token: the in-memory copy every request reads, its
//! durable copy under a single well-known key, and the signal raised when
//! the server rejects it.
//!
//! The vault is the one resource written outside the normal store path:
//! Transport purges it directly on an authorization failure, even when no
//! session operation is running.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, watch};

/// Storage key under which the bearer token is persisted
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Session-level events the presentation layer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// The stored credential was rejected and purged; redirect to login
    Invalidated,
}

/// Error when reading or writing durable client storage
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Storage file is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}

/// Durable client storage for the bearer token
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<Option<String>, StorageError>;

    fn save(&self, token: &str) -> Result<(), StorageError>;

    fn remove(&self) -> Result<(), StorageError>;
}

// ============================================================================
// File-backed storage
// ============================================================================

/// JSON key/value file, the desktop counterpart of browser local storage
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(TOKEN_STORAGE_KEY))
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        entries.insert(TOKEN_STORAGE_KEY.to_string(), token.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        if entries.remove(TOKEN_STORAGE_KEY).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

// ============================================================================
// In-memory storage
// ============================================================================

/// Storage that lives as long as the process; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated as if a previous run had logged in
    pub fn seeded(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    /// Current persisted value
    pub fn peek(&self) -> Option<String> {
        self.slot.lock().map(|slot| slot.clone()).unwrap_or_default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.peek())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}

// ============================================================================
// Vault
// ============================================================================

/// In-memory token plus durable storage plus invalidation signal
pub struct TokenVault {
    current: watch::Sender<Option<String>>,
    storage: Box<dyn TokenStorage>,
    signals: broadcast::Sender<SessionSignal>,
}

impl TokenVault {
    /// Empty vault; nothing is read from storage
    pub fn new(storage: impl TokenStorage + 'static) -> Self {
        Self::with_token(storage, None)
    }

    /// Vault seeded from durable storage (process start / reload)
    ///
    /// Only the token is rehydrated; identity is always re-fetched.
    pub fn rehydrate(storage: impl TokenStorage + 'static) -> Self {
        let token = match storage.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read persisted token, starting anonymous");
                None
            }
        };
        if token.is_some() {
            tracing::info!("Rehydrated persisted session token");
        }
        Self::with_token(storage, token)
    }

    fn with_token(storage: impl TokenStorage + 'static, token: Option<String>) -> Self {
        let (current, _) = watch::channel(token);
        let (signals, _) = broadcast::channel(16);
        Self {
            current,
            storage: Box::new(storage),
            signals,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    pub fn has_token(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Set the token in memory and persist it
    pub fn store(&self, token: impl Into<String>) {
        let token = token.into();
        if let Err(e) = self.storage.save(&token) {
            tracing::error!(error = %e, "Failed to persist session token");
        }
        self.current.send_replace(Some(token));
    }

    /// Remove the token from memory and storage; returns whether one was present
    pub fn clear(&self) -> bool {
        let previous = self.current.send_replace(None);
        self.purge_storage();
        previous.is_some()
    }

    /// Clear and raise [`SessionSignal::Invalidated`] if a token was present
    pub fn invalidate(&self) -> bool {
        let cleared = self.clear();
        if cleared {
            self.signal_invalidated();
        }
        cleared
    }

    /// Clear only if the stored token is still `token`
    ///
    /// Concurrent rejections of the same credential purge it once and signal
    /// once; a newer token stored meanwhile is left alone.
    pub fn invalidate_if_current(&self, token: &str) -> bool {
        let cleared = self.current.send_if_modified(|current| {
            if current.as_deref() == Some(token) {
                *current = None;
                true
            } else {
                false
            }
        });
        if cleared {
            self.purge_storage();
            self.signal_invalidated();
        }
        cleared
    }

    /// Observe token changes
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.current.subscribe()
    }

    /// Observe session signals
    pub fn signals(&self) -> broadcast::Receiver<SessionSignal> {
        self.signals.subscribe()
    }

    fn purge_storage(&self) {
        if let Err(e) = self.storage.remove() {
            tracing::error!(error = %e, "Failed to remove persisted session token");
        }
    }

    fn signal_invalidated(&self) {
        tracing::info!("Session token invalidated");
        // No receivers just means nobody is listening for redirects.
        let _ = self.signals.send(SessionSignal::Invalidated);
    }
}

impl std::fmt::Debug for TokenVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVault")
            .field("has_token", &self.has_token())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "skillslab-token-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_rehydrate_reads_persisted_token() {
        let storage = MemoryTokenStorage::seeded("abc");
        let vault = TokenVault::rehydrate(storage);
        assert_eq!(vault.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_new_ignores_storage() {
        let vault = TokenVault::new(MemoryTokenStorage::seeded("abc"));
        assert!(!vault.has_token());
    }

    #[test]
    fn test_store_and_clear_persist() {
        let storage = MemoryTokenStorage::new();
        let vault = TokenVault::new(storage.clone());

        vault.store("t1");
        assert_eq!(storage.peek().as_deref(), Some("t1"));

        assert!(vault.clear());
        assert!(storage.peek().is_none());
        assert!(!vault.clear());
    }

    #[test]
    fn test_invalidate_if_current_signals_once() {
        let vault = TokenVault::new(MemoryTokenStorage::new());
        let mut signals = vault.signals();
        vault.store("stale");

        assert!(vault.invalidate_if_current("stale"));
        assert!(!vault.invalidate_if_current("stale"));

        assert_eq!(signals.try_recv(), Ok(SessionSignal::Invalidated));
        assert!(signals.try_recv().is_err());
    }

    #[test]
    fn test_invalidate_if_current_spares_newer_token() {
        let vault = TokenVault::new(MemoryTokenStorage::new());
        vault.store("fresh");
        assert!(!vault.invalidate_if_current("stale"));
        assert_eq!(vault.token().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_subscribers_observe_changes() {
        let vault = TokenVault::new(MemoryTokenStorage::new());
        let mut rx = vault.subscribe();
        vault.store("t");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_deref(), Some("t"));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let path = temp_storage_path("roundtrip");
        let _ = fs::remove_file(&path);
        let storage = FileTokenStorage::new(&path);

        assert!(storage.load().unwrap().is_none());
        storage.save("persisted").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("persisted"));

        let reloaded = TokenVault::rehydrate(FileTokenStorage::new(&path));
        assert_eq!(reloaded.token().as_deref(), Some("persisted"));

        storage.remove().unwrap();
        assert!(storage.load().unwrap().is_none());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_storage_keeps_other_keys() {
        let path = temp_storage_path("otherkeys");
        fs::write(&path, r#"{"theme":"dark"}"#).unwrap();
        let storage = FileTokenStorage::new(&path);

        storage.save("t").unwrap();
        storage.remove().unwrap();

        let raw: BTreeMap<String, String> =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw.get("theme").map(String::as_str), Some("dark"));
        assert!(!raw.contains_key(TOKEN_STORAGE_KEY));
        let _ = fs::remove_file(&path);
    }
}
