//! Environment name and connection string resolution for table storage sources.

mod env;
mod options;
mod resolver;

pub use env::{EnvLookup, ProcessEnv};
pub use options::{
    DEFAULT_CONNECTION_STRING_VARIABLE, DEFAULT_ENVIRONMENT_NAME_VARIABLE,
    DEVELOPMENT_STORAGE_CONNECTION_STRING, LOCAL_ENVIRONMENT_NAME, StorageOptions,
};
pub use resolver::{
    ResolvedConfigurationSource, add_table_storage, resolve_connection_string,
    resolve_environment_name,
};
