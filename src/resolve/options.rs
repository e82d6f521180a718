//! Options controlling how a table storage source is resolved.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Environment variable consulted for the environment name when none is supplied.
pub const DEFAULT_ENVIRONMENT_NAME_VARIABLE: &str = "APPSETTING_EnvironmentName";

/// Environment variable consulted for the connection string when none is supplied.
pub const DEFAULT_CONNECTION_STRING_VARIABLE: &str =
    "APPSETTING_ConfigurationStorageConnectionString";

/// Environment name used when nothing else is configured.
pub const LOCAL_ENVIRONMENT_NAME: &str = "LOCAL";

/// Connection string for the local storage emulator.
pub const DEVELOPMENT_STORAGE_CONNECTION_STRING: &str = "UseDevelopmentStorage=true";

/// Options for a table storage configuration source.
///
/// Directly supplied values always take precedence over the environment
/// variables named here, whatever those variables contain.
///
/// # Examples
///
/// ```rust
/// use tablestore_config::resolve::StorageOptions;
///
/// let options = StorageOptions::configured(|o| {
///     o.configuration_keys = vec!["DatabaseUrl".to_string()];
///     o.environment_name = Some("PROD".to_string());
/// });
///
/// assert_eq!(options.environment_name.as_deref(), Some("PROD"));
/// assert!(options.prefix_configuration_keys);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageOptions {
    /// Keys that may be requested from the store.
    pub configuration_keys: Vec<String>,
    /// Directly supplied environment name.
    pub environment_name: Option<String>,
    /// Variable read when `environment_name` is not supplied.
    pub environment_name_variable: String,
    /// Directly supplied connection string.
    pub storage_connection_string: Option<String>,
    /// Variable read when `storage_connection_string` is not supplied.
    pub storage_connection_string_variable: String,
    /// Namespace store keys by environment name.
    pub prefix_configuration_keys: bool,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            configuration_keys: Vec::new(),
            environment_name: None,
            environment_name_variable: DEFAULT_ENVIRONMENT_NAME_VARIABLE.to_string(),
            storage_connection_string: None,
            storage_connection_string_variable: DEFAULT_CONNECTION_STRING_VARIABLE.to_string(),
            prefix_configuration_keys: true,
        }
    }
}

impl StorageOptions {
    /// Create options holding the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options by applying `configure` once to a defaulted value.
    pub fn configured<F>(configure: F) -> Self
    where
        F: FnOnce(&mut StorageOptions),
    {
        let mut options = Self::default();
        configure(&mut options);
        options
    }

    /// Read options from the `section` table of an already built `config::Config`.
    ///
    /// Fields missing from the section keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`](crate::error::ConfigError::ParseError)
    /// if the section is missing or has the wrong shape.
    pub fn from_config_section(config: &config::Config, section: &str) -> Result<Self> {
        Ok(config.get::<StorageOptions>(section)?)
    }

    /// Set the keys that may be requested from the store.
    pub fn with_configuration_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configuration_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Pin the environment name.
    pub fn with_environment_name(mut self, name: impl Into<String>) -> Self {
        self.environment_name = Some(name.into());
        self
    }

    /// Pin the storage connection string.
    pub fn with_storage_connection_string(mut self, connection: impl Into<String>) -> Self {
        self.storage_connection_string = Some(connection.into());
        self
    }

    /// Change the variable consulted for the environment name.
    ///
    /// An empty name is ignored and the current variable is kept.
    pub fn with_environment_name_variable(mut self, variable: impl Into<String>) -> Self {
        let variable = variable.into();
        if !variable.is_empty() {
            self.environment_name_variable = variable;
        }
        self
    }

    /// Change the variable consulted for the connection string.
    ///
    /// An empty name is ignored and the current variable is kept.
    pub fn with_connection_string_variable(mut self, variable: impl Into<String>) -> Self {
        let variable = variable.into();
        if !variable.is_empty() {
            self.storage_connection_string_variable = variable;
        }
        self
    }

    /// Enable or disable environment prefixing of store keys.
    pub fn with_prefix_configuration_keys(mut self, prefix: bool) -> Self {
        self.prefix_configuration_keys = prefix;
        self
    }

    /// Variable to read for the environment name, falling back to the default
    /// when a callback blanked the field.
    pub(crate) fn effective_environment_name_variable(&self) -> &str {
        non_empty_or(&self.environment_name_variable, DEFAULT_ENVIRONMENT_NAME_VARIABLE)
    }

    /// Variable to read for the connection string, falling back to the default
    /// when a callback blanked the field.
    pub(crate) fn effective_connection_string_variable(&self) -> &str {
        non_empty_or(
            &self.storage_connection_string_variable,
            DEFAULT_CONNECTION_STRING_VARIABLE,
        )
    }
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}
