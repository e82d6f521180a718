//! Configuration loader that merges multiple sources.

use crate::error::{ConfigError, Result};
use crate::sources::{AddSource, ConfigSource};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Loads and merges configuration from multiple sources.
///
/// Sources are merged lowest priority first, so higher priority sources
/// override values from lower priority ones. Sources with equal priority keep
/// their registration order.
pub struct ConfigLoader {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no sources are registered.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn sorted(&self) -> Vec<&dyn ConfigSource> {
        let mut sorted: Vec<&dyn ConfigSource> = self.sources.iter().map(|s| &**s).collect();
        sorted.sort_by_key(|s| s.priority());
        sorted
    }

    /// Load and merge configuration from all sources into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No sources are registered
    /// - Any source fails to load
    /// - Deserialization fails
    pub fn load<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if self.sources.is_empty() {
            return Err(ConfigError::LoadError(
                "No configuration sources specified".to_string(),
            ));
        }

        // Keys are kept verbatim: no lowercasing and no path splitting on '.' or '['
        let mut merged = config::Map::new();

        for source in self.sorted() {
            let values = source.load().map_err(|e| {
                ConfigError::LoadError(format!("Failed to load source '{}': {}", source.name(), e))
            })?;
            debug!(source = %source.name(), values = values.len(), "Loaded configuration source");

            merged.extend(values);
        }

        config::Value::new(None, config::ValueKind::Table(merged))
            .try_deserialize::<T>()
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    /// Get the list of source names in priority order.
    pub fn source_names(&self) -> Vec<String> {
        self.sorted().iter().map(|s| s.name()).collect()
    }
}

impl AddSource for ConfigLoader {
    fn add_source<S: ConfigSource + 'static>(&mut self, source: S) {
        self.sources.push(Box::new(source));
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
