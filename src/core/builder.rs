//! Builder for constructing StorageConfig instances.

use crate::core::{ConfigLoader, StorageConfig};
use crate::error::{ConfigError, Result, ValidationError};
use crate::resolve::{EnvLookup, ProcessEnv, StorageOptions, add_table_storage};
use crate::sources::{AddSource, ConfigSource, TableStore};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Type alias for any-based validator functions used during building.
type AnyValidator =
    Arc<dyn Fn(&dyn std::any::Any) -> std::result::Result<(), ValidationError> + Send + Sync>;

/// Type alias for typed validator functions.
type TypedValidator<T> = Arc<dyn Fn(&T) -> std::result::Result<(), ValidationError> + Send + Sync>;

/// Builder for constructing a `StorageConfig` instance.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use tablestore_config::prelude::*;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize, Clone)]
/// struct AppConfig {
///     database_url: String,
/// }
///
/// # fn example() -> Result<()> {
/// let store = Arc::new(InMemoryTableStore::new());
///
/// let config = StorageConfig::builder()
///     .with_table_storage(store, |o| {
///         o.configuration_keys = vec!["database_url".to_string()];
///     })?
///     .build::<AppConfig>()?;
/// # Ok(())
/// # }
/// ```
pub struct StorageConfigBuilder {
    loader: ConfigLoader,
    validator: Option<AnyValidator>,
}

impl StorageConfigBuilder {
    /// Create a new builder with no sources.
    pub fn new() -> Self {
        Self {
            loader: ConfigLoader::new(),
            validator: None,
        }
    }

    /// Add a custom configuration source.
    pub fn with_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.loader.add_source(source);
        self
    }

    /// Resolve and add a table storage source, reading the process environment.
    ///
    /// `configure` receives defaulted [`StorageOptions`] and is called exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnresolvedConnectionString`] when the environment
    /// is not local and no connection string is configured.
    pub fn with_table_storage<F>(self, store: Arc<dyn TableStore>, configure: F) -> Result<Self>
    where
        F: FnOnce(&mut StorageOptions),
    {
        self.with_table_storage_env(&ProcessEnv, store, configure)
    }

    /// Resolve and add a table storage source, reading variables from `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnresolvedConnectionString`] when the environment
    /// is not local and no connection string is configured.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use std::sync::Arc;
    /// use tablestore_config::prelude::*;
    ///
    /// let mut env = HashMap::new();
    /// env.insert("APPSETTING_EnvironmentName".to_string(), "STAGE".to_string());
    ///
    /// let result = StorageConfig::builder().with_table_storage_env(
    ///     &env,
    ///     Arc::new(InMemoryTableStore::new()),
    ///     |o| o.configuration_keys = vec!["database_url".to_string()],
    /// );
    ///
    /// // STAGE is not local, so a connection string is required
    /// assert!(result.is_err());
    /// ```
    pub fn with_table_storage_env<F>(
        mut self,
        env: &dyn EnvLookup,
        store: Arc<dyn TableStore>,
        configure: F,
    ) -> Result<Self>
    where
        F: FnOnce(&mut StorageOptions),
    {
        add_table_storage(&mut self.loader, env, store, configure)?;
        Ok(self)
    }

    /// Add a validation function that must pass before the config is loaded.
    ///
    /// The validator runs on the initial build and before every reload or update.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use tablestore_config::prelude::*;
    /// use serde::Deserialize;
    ///
    /// #[derive(Debug, Deserialize, Clone)]
    /// struct AppConfig {
    ///     database_url: String,
    /// }
    ///
    /// let builder = StorageConfig::builder().with_validation(|config: &AppConfig| {
    ///     if config.database_url.is_empty() {
    ///         return Err(ValidationError::invalid_field("database_url", "must not be empty"));
    ///     }
    ///     Ok(())
    /// });
    /// ```
    pub fn with_validation<F, T>(mut self, validator: F) -> Self
    where
        F: Fn(&T) -> std::result::Result<(), ValidationError> + Send + Sync + 'static,
        T: 'static,
    {
        self.validator = Some(Arc::new(move |config: &dyn std::any::Any| {
            let typed_config = config
                .downcast_ref::<T>()
                .ok_or_else(|| ValidationError::custom("Type mismatch in validator"))?;
            validator(typed_config)
        }));
        self
    }

    /// Build the configuration handle.
    ///
    /// This performs the initial load from all sources and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No sources were added
    /// - Initial configuration load fails
    /// - Deserialization fails
    /// - Validation fails
    pub fn build<T>(self) -> Result<StorageConfig<T>>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let config: T = self.loader.load()?;

        let typed_validator: Option<TypedValidator<T>> = self.validator.as_ref().map(|v| {
            let validator = Arc::clone(v);
            Arc::new(move |config: &T| validator(config as &dyn std::any::Any))
                as TypedValidator<T>
        });

        if let Some(validator) = &typed_validator {
            validator(&config).map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }

        Ok(StorageConfig::with_loader(config, self.loader, typed_validator))
    }
}

impl AddSource for StorageConfigBuilder {
    fn add_source<S: ConfigSource + 'static>(&mut self, source: S) {
        self.loader.add_source(source);
    }
}

impl Default for StorageConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageConfig<()> {
    /// Create a new builder for constructing a configuration handle.
    pub fn builder() -> StorageConfigBuilder {
        StorageConfigBuilder::new()
    }
}
