//! Key-value snapshot store contracts and implementations.
//!
//! # Responsibility
//! - Store serialized boards under opaque string keys.
//! - Surface capacity and transport failures as `StoreError`.
//!
//! # Invariants
//! - `set` either fully replaces the value for `key` or leaves the store unchanged.
//! - Writing an existing key overwrites it; collisions are not detected here.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Write would exceed the configured capacity.
    QuotaExceeded { required: usize, quota: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::QuotaExceeded { required, quota } => write!(
                f,
                "storage quota exceeded: {required} bytes required, {quota} bytes allowed"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Opaque key-value store holding serialized boards.
pub trait SnapshotStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        (**self).contains(key)
    }
}

/// SQLite-backed snapshot store over the `save_records` table.
pub struct SqliteSnapshotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotStore<'conn> {
    /// Wraps a connection returned by `open_db` / `open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotStore for SqliteSnapshotStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM save_records WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO save_records (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                created_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM save_records WHERE key = ?1);",
            [key],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }
}

/// In-process store, optionally capped like a browser storage quota.
///
/// Usage is counted as the UTF-8 byte length of every key plus value.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    entries: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes pushing usage above `quota_bytes`.
    pub fn with_quota_bytes(quota_bytes: usize) -> Self {
        Self {
            entries: RefCell::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Current usage in bytes.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.borrow_mut();
        if let Some(quota) = self.quota_bytes {
            let replaced = entries
                .get(key)
                .map_or(0, |previous| key.len() + previous.len());
            let used: usize = entries.iter().map(|(k, v)| k.len() + v.len()).sum();
            let required = used - replaced + key.len() + value.len();
            if required > quota {
                return Err(StoreError::QuotaExceeded { required, quota });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySnapshotStore, SnapshotStore, StoreError};

    #[test]
    fn memory_store_roundtrip_and_overwrite() {
        let store = MemorySnapshotStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        assert!(store.contains("k").unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn memory_store_quota_rejects_without_partial_write() {
        let store = MemorySnapshotStore::with_quota_bytes(10);
        store.set("ab", "cdef").unwrap();

        let err = store.set("gh", "0123456789").unwrap_err();
        assert!(matches!(
            err,
            StoreError::QuotaExceeded {
                required: 18,
                quota: 10
            }
        ));
        assert!(!store.contains("gh").unwrap());
        assert_eq!(store.used_bytes(), 6);
    }

    #[test]
    fn memory_store_quota_counts_replacement_once() {
        let store = MemorySnapshotStore::with_quota_bytes(8);
        store.set("ab", "cdefgh").unwrap();
        store.set("ab", "ijklmn").unwrap();
        assert_eq!(store.get("ab").unwrap().as_deref(), Some("ijklmn"));
    }
}
