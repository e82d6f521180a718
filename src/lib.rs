//! # tablestore-config
//!
//! Environment-aware bootstrap of configuration sources backed by a table store.
//!
//! ## Overview
//!
//! Before a table storage source can be registered, two strings must be known:
//! the environment name and the storage connection string. Both are resolved
//! with the same precedence:
//!
//! 1. A value supplied directly in [`StorageOptions`](resolve::StorageOptions)
//! 2. The environment variable named in the options
//!    (`APPSETTING_EnvironmentName` / `APPSETTING_ConfigurationStorageConnectionString`)
//! 3. A local-development fallback: `LOCAL`, and `UseDevelopmentStorage=true`
//!    only when the environment resolved to `LOCAL`
//!
//! Outside the local environment a missing connection string is an error and
//! nothing is registered.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tablestore_config::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, Clone)]
//! struct AppConfig {
//!     database_url: String,
//!     feature_flags: String,
//! }
//!
//! # fn example(store: Arc<dyn TableStore>) -> tablestore_config::error::Result<()> {
//! let config = StorageConfig::builder()
//!     .with_table_storage(store, |o| {
//!         o.configuration_keys = vec!["database_url".into(), "feature_flags".into()];
//!     })?
//!     .build::<AppConfig>()?;
//!
//! let cfg = config.get();
//! println!("Database: {}", cfg.database_url);
//!
//! // Pick up changes made in the store
//! config.reload()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Resolution reads environment variables through [`EnvLookup`](resolve::EnvLookup),
//! so tests can pass a `HashMap` instead of touching the process environment.
//!
//! ## Feature Flags
//!
//! - `toml` (default): deserialize [`StorageOptions`](resolve::StorageOptions)
//!   from TOML through the `config` crate.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod resolve;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{StorageConfig, StorageConfigBuilder};
    pub use crate::error::{ConfigError, Result, ValidationError};
    pub use crate::resolve::{EnvLookup, ProcessEnv, StorageOptions, add_table_storage};
    pub use crate::sources::{AddSource, ConfigSource, InMemoryTableStore, TableStore};
}
