//! Error types for tablestore-config.

use std::fmt;

/// Result type alias for tablestore-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when resolving or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No storage connection string could be found and the environment is not local.
    #[error(
        "No storage connection string configured for environment '{environment}': \
         set the '{variable}' environment variable or supply one in the storage options"
    )]
    UnresolvedConnectionString {
        /// The resolved environment name
        environment: String,
        /// The environment variable that was consulted
        variable: String,
    },

    /// The table store failed to return the requested rows.
    #[error("Table store error: {0}")]
    StoreError(String),

    /// Failed to load configuration from a source.
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// Failed to deserialize configuration.
    #[error("Failed to deserialize configuration: {0}")]
    DeserializationError(String),

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// Failed to parse configuration input.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Generic error for other cases.
    #[error("Configuration error: {0}")]
    Other(String),
}

impl ConfigError {
    /// Returns true if this error was raised because no connection string could be resolved.
    pub fn is_unresolved_connection_string(&self) -> bool {
        matches!(self, Self::UnresolvedConnectionString { .. })
    }
}

/// Validation error for configuration validation.
#[derive(Debug)]
pub enum ValidationError {
    /// Custom validation error with a message.
    Custom(String),

    /// A specific field has an invalid value.
    InvalidField {
        /// The field name/path
        field: String,
        /// The reason why it's invalid
        reason: String,
    },

    /// Multiple validation errors occurred.
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Create a custom validation error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(msg) => write!(f, "{}", msg),
            Self::InvalidField { field, reason } => {
                write!(f, "Field '{}' is invalid: {}", field, reason)
            }
            Self::Multiple(errors) => {
                writeln!(f, "Multiple validation errors:")?;
                for (i, err) in errors.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        ConfigError::ValidationError(err.to_string())
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
