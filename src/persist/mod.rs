//! Key-value persistence medium and its implementations.

/// SQLite-backed medium.
pub mod sqlite;

use hashbrown::HashMap;

/// Failures raised by a persistence medium.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// SQLite rejected a statement or transaction.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A value could not be encoded.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Any other medium failure.
    #[error("{0}")]
    Message(String),
}

/// Result alias for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// String-keyed, string-valued persistent storage.
pub trait KvStore: Send {
    /// Reads `key`; `None` when it was never written.
    fn get(&self, key: &str) -> PersistResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> PersistResult<()>;

    /// Deletes `key` if present.
    fn remove(&mut self, key: &str) -> PersistResult<()>;

    /// Read-modify-write of a single key.
    ///
    /// `f` receives the current value and returns the replacement, or `None`
    /// to leave the key untouched. Mediums that support transactions run the
    /// whole step inside one.
    fn update(
        &mut self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Option<String>,
    ) -> PersistResult<()> {
        let current = self.get(key)?;
        match f(current) {
            Some(next) => self.set(key, &next),
            None => Ok(()),
        }
    }
}

/// In-memory medium; contents vanish when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    /// Creates an empty medium.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PersistResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
