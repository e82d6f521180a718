//! Environment name and connection string resolution.

use super::env::EnvLookup;
use super::options::{DEVELOPMENT_STORAGE_CONNECTION_STRING, LOCAL_ENVIRONMENT_NAME, StorageOptions};
use crate::error::{ConfigError, Result};
use crate::sources::{AddSource, TableStorageSource, TableStore};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Resolve the environment name.
///
/// Precedence, first match wins:
/// 1. `options.environment_name`, used verbatim
/// 2. the variable named by `options.environment_name_variable`
/// 3. `"LOCAL"`
pub fn resolve_environment_name(options: &StorageOptions, env: &dyn EnvLookup) -> String {
    if let Some(name) = &options.environment_name {
        debug!(environment = %name, "Using directly supplied environment name");
        return name.clone();
    }

    let variable = options.effective_environment_name_variable();
    if let Some(name) = env.var(variable) {
        debug!(environment = %name, variable, "Using environment name from environment variable");
        return name;
    }

    debug!(variable, "Environment name variable not set, assuming local environment");
    LOCAL_ENVIRONMENT_NAME.to_string()
}

/// Resolve the storage connection string for an already resolved `environment`.
///
/// Precedence, first match wins:
/// 1. `options.storage_connection_string`, used verbatim
/// 2. the variable named by `options.storage_connection_string_variable`
/// 3. `"UseDevelopmentStorage=true"`, only when `environment` is `"LOCAL"`
///
/// # Errors
///
/// Returns [`ConfigError::UnresolvedConnectionString`] when none of the above applies.
pub fn resolve_connection_string(
    options: &StorageOptions,
    env: &dyn EnvLookup,
    environment: &str,
) -> Result<String> {
    if let Some(connection) = &options.storage_connection_string {
        debug!(environment, "Using directly supplied storage connection string");
        return Ok(connection.clone());
    }

    let variable = options.effective_connection_string_variable();
    if let Some(connection) = env.var(variable) {
        debug!(environment, variable, "Using storage connection string from environment variable");
        return Ok(connection);
    }

    if environment == LOCAL_ENVIRONMENT_NAME {
        warn!(variable, "No storage connection string configured, using local development storage");
        return Ok(DEVELOPMENT_STORAGE_CONNECTION_STRING.to_string());
    }

    error!(environment, variable, "No storage connection string configured");
    Err(ConfigError::UnresolvedConnectionString {
        environment: environment.to_string(),
        variable: variable.to_string(),
    })
}

/// The fully resolved description of a table storage configuration source.
///
/// Built once per resolution and never modified afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfigurationSource {
    environment_name: String,
    connection_string: String,
    configuration_keys: Vec<String>,
    prefix_configuration_keys: bool,
}

impl ResolvedConfigurationSource {
    /// Resolve `options` against `env`.
    ///
    /// # Errors
    ///
    /// Fails when no connection string is available outside the local environment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use tablestore_config::resolve::{ResolvedConfigurationSource, StorageOptions};
    ///
    /// # fn example() -> tablestore_config::error::Result<()> {
    /// let options = StorageOptions::new().with_configuration_keys(["Key"]);
    /// let resolved = ResolvedConfigurationSource::resolve(&options, &HashMap::<String, String>::new())?;
    ///
    /// assert_eq!(resolved.environment_name(), "LOCAL");
    /// assert_eq!(resolved.connection_string(), "UseDevelopmentStorage=true");
    /// # Ok(())
    /// # }
    /// ```
    pub fn resolve(options: &StorageOptions, env: &dyn EnvLookup) -> Result<Self> {
        let environment_name = resolve_environment_name(options, env);
        let connection_string = resolve_connection_string(options, env, &environment_name)?;

        Ok(Self {
            environment_name,
            connection_string,
            configuration_keys: options.configuration_keys.clone(),
            prefix_configuration_keys: options.prefix_configuration_keys,
        })
    }

    /// The resolved environment name.
    pub fn environment_name(&self) -> &str {
        &self.environment_name
    }

    /// The resolved storage connection string.
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Keys that may be requested from the store.
    pub fn configuration_keys(&self) -> &[String] {
        &self.configuration_keys
    }

    /// Whether store keys are namespaced by environment name.
    pub fn prefix_configuration_keys(&self) -> bool {
        self.prefix_configuration_keys
    }

    /// Whether this source targets the local development environment.
    pub fn is_local(&self) -> bool {
        self.environment_name == LOCAL_ENVIRONMENT_NAME
    }

    /// The row key under which `key` is stored.
    pub fn qualified_key(&self, key: &str) -> String {
        if self.prefix_configuration_keys {
            format!("{}:{}", self.environment_name, key)
        } else {
            key.to_string()
        }
    }
}

impl fmt::Debug for ResolvedConfigurationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfigurationSource")
            .field("environment_name", &self.environment_name)
            .field("connection_string", &"<redacted>")
            .field("configuration_keys", &self.configuration_keys)
            .field("prefix_configuration_keys", &self.prefix_configuration_keys)
            .finish()
    }
}

/// Resolve a table storage source and register it with `builder`.
///
/// `configure` is applied once to defaulted [`StorageOptions`]. The resulting
/// source is added to `builder` exactly once; on error nothing is added.
///
/// # Errors
///
/// Fails when no connection string is available outside the local environment.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use tablestore_config::core::ConfigLoader;
/// use tablestore_config::resolve::add_table_storage;
/// use tablestore_config::sources::InMemoryTableStore;
///
/// # fn example() -> tablestore_config::error::Result<()> {
/// let mut loader = ConfigLoader::new();
/// let store = Arc::new(InMemoryTableStore::new());
///
/// add_table_storage(&mut loader, &HashMap::<String, String>::new(), store, |o| {
///     o.configuration_keys = vec!["database_url".to_string()];
/// })?;
/// # Ok(())
/// # }
/// ```
pub fn add_table_storage<B, F>(
    builder: &mut B,
    env: &dyn EnvLookup,
    store: Arc<dyn TableStore>,
    configure: F,
) -> Result<()>
where
    B: AddSource,
    F: FnOnce(&mut StorageOptions),
{
    let options = StorageOptions::configured(configure);
    let resolved = ResolvedConfigurationSource::resolve(&options, env)?;

    info!(
        environment = resolved.environment_name(),
        keys = resolved.configuration_keys().len(),
        prefixed = resolved.prefix_configuration_keys(),
        "Registering table storage configuration source"
    );

    builder.add_source(TableStorageSource::new(resolved, store));
    Ok(())
}
