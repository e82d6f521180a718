//! Table storage configuration source.

use super::{ConfigSource, TableStore};
use crate::error::{ConfigError, Result};
use crate::resolve::ResolvedConfigurationSource;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Configuration source backed by a table store.
///
/// Only the whitelisted configuration keys are requested. When key prefixing
/// is enabled each key is looked up as `"{environment}:{key}"`; values are
/// always exposed under the bare key.
///
/// Usually created through [`add_table_storage`](crate::resolve::add_table_storage)
/// or [`StorageConfigBuilder::with_table_storage`](crate::core::StorageConfigBuilder::with_table_storage).
pub struct TableStorageSource {
    resolved: ResolvedConfigurationSource,
    store: Arc<dyn TableStore>,
    priority: i32,
}

impl TableStorageSource {
    /// Create a source for an already resolved descriptor.
    pub fn new(resolved: ResolvedConfigurationSource, store: Arc<dyn TableStore>) -> Self {
        Self {
            resolved,
            store,
            priority: 250, // Above custom sources (100)
        }
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// The descriptor this source was built from.
    pub fn resolved(&self) -> &ResolvedConfigurationSource {
        &self.resolved
    }
}

impl ConfigSource for TableStorageSource {
    fn load(&self) -> Result<HashMap<String, config::Value>> {
        let resolved = &self.resolved;
        let qualified: Vec<String> = resolved
            .configuration_keys()
            .iter()
            .map(|key| resolved.qualified_key(key))
            .collect();

        let mut rows = self
            .store
            .fetch(resolved.connection_string(), &qualified)
            .map_err(|e| {
                ConfigError::StoreError(format!(
                    "Failed to fetch configuration for environment '{}': {}",
                    resolved.environment_name(),
                    e
                ))
            })?;

        let mut map = HashMap::with_capacity(rows.len());
        for (key, row_key) in resolved.configuration_keys().iter().zip(&qualified) {
            match rows.remove(row_key) {
                Some(value) => {
                    map.insert(key.clone(), config::Value::from(value));
                }
                None => debug!(key = %row_key, "Configuration key not found in table store"),
            }
        }

        Ok(map)
    }

    fn name(&self) -> String {
        format!("table-storage:{}", self.resolved.environment_name())
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

impl fmt::Debug for TableStorageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableStorageSource")
            .field("resolved", &self.resolved)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::StorageOptions;
    use crate::sources::InMemoryTableStore;
    use std::collections::HashMap;

    struct FailingStore;

    impl TableStore for FailingStore {
        fn fetch(&self, _: &str, _: &[String]) -> Result<HashMap<String, String>> {
            Err(ConfigError::StoreError("connection refused".to_string()))
        }
    }

    fn resolved(options: StorageOptions) -> ResolvedConfigurationSource {
        ResolvedConfigurationSource::resolve(&options, &HashMap::<String, String>::new()).unwrap()
    }

    #[test]
    fn test_load_prefixed_keys() {
        let store = InMemoryTableStore::new()
            .with_row("conn", "QA:database_url", "postgres://qa/db")
            .with_row("conn", "PROD:database_url", "postgres://prod/db")
            .with_row("conn", "database_url", "postgres://shared/db");
        let options = StorageOptions::new()
            .with_configuration_keys(["database_url"])
            .with_environment_name("QA")
            .with_storage_connection_string("conn");

        let source = TableStorageSource::new(resolved(options), Arc::new(store));
        let map = source.load().unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(
            map["database_url"].clone().into_string().unwrap(),
            "postgres://qa/db"
        );
    }

    #[test]
    fn test_load_unprefixed_keys() {
        let store = InMemoryTableStore::new()
            .with_row("conn", "QA:database_url", "postgres://qa/db")
            .with_row("conn", "database_url", "postgres://shared/db");
        let options = StorageOptions::new()
            .with_configuration_keys(["database_url"])
            .with_environment_name("QA")
            .with_storage_connection_string("conn")
            .with_prefix_configuration_keys(false);

        let source = TableStorageSource::new(resolved(options), Arc::new(store));
        let map = source.load().unwrap();

        assert_eq!(
            map["database_url"].clone().into_string().unwrap(),
            "postgres://shared/db"
        );
    }

    #[test]
    fn test_load_skips_missing_and_unlisted_keys() {
        let store = InMemoryTableStore::new()
            .with_row("UseDevelopmentStorage=true", "LOCAL:present", "yes")
            .with_row("UseDevelopmentStorage=true", "LOCAL:unlisted", "no");
        let options = StorageOptions::new().with_configuration_keys(["present", "absent"]);

        let source = TableStorageSource::new(resolved(options), Arc::new(store));
        let map = source.load().unwrap();

        assert_eq!(map.len(), 1);
        assert!(map.contains_key("present"));
    }

    #[test]
    fn test_store_errors_are_wrapped() {
        let options = StorageOptions::new().with_configuration_keys(["key"]);
        let source = TableStorageSource::new(resolved(options), Arc::new(FailingStore));

        let err = source.load().unwrap_err();
        assert!(matches!(err, ConfigError::StoreError(_)));
        assert!(err.to_string().contains("'LOCAL'"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_name_priority_and_debug() {
        let options = StorageOptions::new()
            .with_environment_name("PROD")
            .with_storage_connection_string("AccountKey=secret");
        let source = TableStorageSource::new(resolved(options), Arc::new(InMemoryTableStore::new()));

        assert_eq!(source.name(), "table-storage:PROD");
        assert_eq!(source.priority(), 250);
        assert_eq!(source.with_priority(400).priority(), 400);

        let options = StorageOptions::new().with_storage_connection_string("AccountKey=secret");
        let source = TableStorageSource::new(resolved(options), Arc::new(InMemoryTableStore::new()));
        assert!(!format!("{:?}", source).contains("secret"));
    }
}
