//! Application layer - configuration and service wiring.

mod config;
mod context;

pub use config::{Config, LoggingConfig, StorageConfig};
pub use context::{AppContext, MemoryContext, SqliteContext};
