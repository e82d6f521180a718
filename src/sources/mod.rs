//! Configuration source implementations.

mod config_source;
mod store;
mod table_storage;

pub use config_source::{AddSource, ConfigSource};
pub use store::{InMemoryTableStore, TableStore};
pub use table_storage::TableStorageSource;
