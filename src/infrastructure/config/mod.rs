//! Application configuration.

/// Configuration values.
pub mod app_config;
/// Command-line arguments.
pub mod args;
/// Config file storage.
pub mod storage;

pub use app_config::{AppConfig, LogLevel, NotificationsConfig, TokenBackend};
pub use args::{CliArgs, CodeSource, Command};
pub use storage::{ConfigError, StorageManager};
