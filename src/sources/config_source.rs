//! Configuration source traits.

use crate::error::Result;
use std::collections::HashMap;

/// Trait for configuration sources.
///
/// Implement this trait to feed values from custom backends (databases,
/// key-value stores, remote APIs) into a [`ConfigLoader`](crate::core::ConfigLoader).
pub trait ConfigSource: Send + Sync {
    /// Load configuration as a raw string key-value map.
    ///
    /// The returned map will be merged with other sources according to precedence rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be loaded or parsed.
    fn load(&self) -> Result<HashMap<String, config::Value>>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;

    /// Get the priority of this source (higher = takes precedence).
    ///
    /// Default priorities:
    /// - Table storage: 250
    /// - Custom sources: 100
    fn priority(&self) -> i32 {
        100
    }
}

/// Something configuration sources can be registered with.
pub trait AddSource {
    /// Register `source`.
    fn add_source<S: ConfigSource + 'static>(&mut self, source: S);
}
