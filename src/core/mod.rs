//! Loading, building and holding merged configuration.

mod builder;
mod config_handle;
mod loader;

pub use builder::StorageConfigBuilder;
pub use config_handle::StorageConfig;
pub use loader::ConfigLoader;
