//! Table store client abstraction.

use crate::error::Result;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Client for a table-style key/value store.
///
/// Implementations own all network access; sources only decide which rows to ask for.
pub trait TableStore: Send + Sync {
    /// Fetch the rows named by `keys` from the store at `connection_string`.
    ///
    /// Rows that do not exist are left out of the returned map.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or queried.
    fn fetch(&self, connection_string: &str, keys: &[String]) -> Result<HashMap<String, String>>;
}

/// A table store held in memory, keyed by connection string then row key.
///
/// Useful for tests and for running against local development storage without
/// an emulator.
///
/// # Examples
///
/// ```rust
/// use tablestore_config::sources::{InMemoryTableStore, TableStore};
///
/// let store = InMemoryTableStore::new()
///     .with_row("UseDevelopmentStorage=true", "LOCAL:database_url", "postgres://localhost/db");
///
/// let rows = store
///     .fetch("UseDevelopmentStorage=true", &["LOCAL:database_url".to_string()])
///     .unwrap();
/// assert_eq!(rows["LOCAL:database_url"], "postgres://localhost/db");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryTableStore {
    tables: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl InMemoryTableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row, returning the store.
    pub fn with_row(
        self,
        connection_string: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.insert(connection_string, key, value);
        self
    }

    /// Insert or replace a row.
    pub fn insert(
        &self,
        connection_string: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.tables
            .write()
            .entry(connection_string.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Remove a row, returning its previous value.
    pub fn remove(&self, connection_string: &str, key: &str) -> Option<String> {
        self.tables
            .write()
            .get_mut(connection_string)
            .and_then(|table| table.remove(key))
    }
}

impl TableStore for InMemoryTableStore {
    fn fetch(&self, connection_string: &str, keys: &[String]) -> Result<HashMap<String, String>> {
        let tables = self.tables.read();
        let Some(table) = tables.get(connection_string) else {
            return Ok(HashMap::new());
        };

        Ok(keys
            .iter()
            .filter_map(|key| table.get(key).map(|value| (key.clone(), value.clone())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_only_requested_keys() {
        let store = InMemoryTableStore::new()
            .with_row("conn", "a", "1")
            .with_row("conn", "b", "2");

        let rows = store
            .fetch("conn", &["a".to_string(), "missing".to_string()])
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows["a"], "1");
    }

    #[test]
    fn test_fetch_is_scoped_by_connection_string() {
        let store = InMemoryTableStore::new().with_row("conn-a", "key", "a");

        assert!(store.fetch("conn-b", &["key".to_string()]).unwrap().is_empty());
        assert_eq!(store.fetch("conn-a", &["key".to_string()]).unwrap()["key"], "a");
    }

    #[test]
    fn test_insert_and_remove() {
        let store = InMemoryTableStore::new();
        store.insert("conn", "key", "old");
        store.insert("conn", "key", "new");
        assert_eq!(store.fetch("conn", &["key".to_string()]).unwrap()["key"], "new");

        assert_eq!(store.remove("conn", "key").as_deref(), Some("new"));
        assert_eq!(store.remove("conn", "key"), None);
        assert_eq!(store.remove("other", "key"), None);
    }
}
