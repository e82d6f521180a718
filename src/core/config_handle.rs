//! The main configuration handle providing lock-free access.

use crate::core::ConfigLoader;
use crate::error::{ConfigError, Result, ValidationError};
use arc_swap::ArcSwap;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Type alias for validator functions.
type Validator<T> = Arc<dyn Fn(&T) -> std::result::Result<(), ValidationError> + Send + Sync>;

/// Configuration handle with lock-free reads and atomic updates.
///
/// Values loaded from table storage can be refreshed with [`reload`](Self::reload);
/// readers holding an earlier `Arc<T>` keep seeing the value they loaded.
///
/// # Examples
///
/// ```rust
/// use tablestore_config::prelude::*;
///
/// let config = StorageConfig::new(42);
/// assert_eq!(*config.get(), 42);
/// ```
pub struct StorageConfig<T> {
    current: Arc<ArcSwap<T>>,
    loader: Option<Arc<ConfigLoader>>,
    validator: Option<Validator<T>>,
}

impl<T> StorageConfig<T> {
    /// Create a handle around a fixed initial value, with no sources to reload from.
    pub fn new(initial: T) -> Self {
        Self {
            current: Arc::new(ArcSwap::new(Arc::new(initial))),
            loader: None,
            validator: None,
        }
    }

    /// Create a configuration handle with loader and validator support.
    pub(crate) fn with_loader(
        initial: T,
        loader: ConfigLoader,
        validator: Option<Validator<T>>,
    ) -> Self {
        Self {
            current: Arc::new(ArcSwap::new(Arc::new(initial))),
            loader: Some(Arc::new(loader)),
            validator,
        }
    }

    /// Get a reference-counted handle to the current configuration.
    ///
    /// Lock-free; readers never block writers or other readers.
    pub fn get(&self) -> Arc<T> {
        self.current.load_full()
    }

    /// Reload configuration from all sources.
    ///
    /// If loading or validation fails, the previous configuration is retained.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The handle was created without a loader
    /// - A source cannot be read
    /// - Deserialization fails
    /// - Validation fails (if a validator is configured)
    pub fn reload(&self) -> Result<()>
    where
        T: DeserializeOwned,
    {
        let loader = self
            .loader
            .as_ref()
            .ok_or_else(|| ConfigError::Other("No loader available for reload".to_string()))?;

        let new_config: T = loader.load().inspect_err(|e| {
            warn!(error = %e, "Configuration reload failed, keeping previous configuration");
        })?;

        self.update(new_config)?;
        debug!(sources = ?loader.source_names(), "Configuration reloaded");
        Ok(())
    }

    /// Replace the configuration with `new_config`, bypassing the loader.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn update(&self, new_config: T) -> Result<()> {
        if let Some(validator) = &self.validator {
            validator(&new_config).map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }

        self.current.store(Arc::new(new_config));
        Ok(())
    }
}

impl<T> Clone for StorageConfig<T> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            loader: self.loader.clone(),
            validator: self.validator.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::add_table_storage;
    use crate::sources::InMemoryTableStore;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct TestConfig {
        database_url: String,
    }

    fn loader_for(store: Arc<InMemoryTableStore>) -> ConfigLoader {
        let mut loader = ConfigLoader::new();
        add_table_storage(&mut loader, &HashMap::<String, String>::new(), store, |o| {
            o.configuration_keys = vec!["database_url".to_string()]
        })
        .unwrap();
        loader
    }

    #[test]
    fn test_clone_shares_state() {
        let config = StorageConfig::new(TestConfig {
            database_url: "a".to_string(),
        });
        let config2 = config.clone();

        config
            .update(TestConfig {
                database_url: "b".to_string(),
            })
            .unwrap();
        assert_eq!(config2.get().database_url, "b");
    }

    #[test]
    fn test_reload_without_loader() {
        let config = StorageConfig::new(TestConfig {
            database_url: "a".to_string(),
        });
        assert!(matches!(config.reload(), Err(ConfigError::Other(_))));
    }

    #[test]
    fn test_reload_picks_up_store_changes() {
        let store = Arc::new(InMemoryTableStore::new());
        store.insert("UseDevelopmentStorage=true", "LOCAL:database_url", "postgres://one");

        let loader = loader_for(Arc::clone(&store));
        let initial: TestConfig = loader.load().unwrap();
        let config = StorageConfig::with_loader(initial, loader, None);
        let before = config.get();

        store.insert("UseDevelopmentStorage=true", "LOCAL:database_url", "postgres://two");
        config.reload().unwrap();

        assert_eq!(before.database_url, "postgres://one");
        assert_eq!(config.get().database_url, "postgres://two");
    }

    #[test]
    fn test_failed_reload_keeps_previous_value() {
        let store = Arc::new(InMemoryTableStore::new());
        store.insert("UseDevelopmentStorage=true", "LOCAL:database_url", "postgres://one");

        let loader = loader_for(Arc::clone(&store));
        let initial: TestConfig = loader.load().unwrap();
        let validator: Validator<TestConfig> = Arc::new(|c: &TestConfig| {
            if c.database_url.starts_with("postgres://") {
                Ok(())
            } else {
                Err(ValidationError::invalid_field("database_url", "must be a postgres url"))
            }
        });
        let config = StorageConfig::with_loader(initial, loader, Some(validator));

        store.insert("UseDevelopmentStorage=true", "LOCAL:database_url", "mysql://two");
        assert!(config.reload().is_err());

        store.remove("UseDevelopmentStorage=true", "LOCAL:database_url");
        assert!(config.reload().is_err());

        assert_eq!(config.get().database_url, "postgres://one");
    }
}
