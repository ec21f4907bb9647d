//! Infrastructure layer with external service adapters.

/// Clock adapters.
pub mod clock;
/// Application configuration.
pub mod config;
/// Service HTTP client.
pub mod http;
/// Terminal navigation.
pub mod navigation;
/// Token storage adapters.
pub mod storage;

pub use clock::{ManualClock, TokioClock};
pub use config::{AppConfig, CliArgs, Command, LogLevel, StorageManager, TokenBackend};
pub use http::ReqwestTransport;
pub use navigation::ConsoleNavigator;
pub use storage::FileTokenStorage;
#[cfg(feature = "keyring")]
pub use storage::KeyringTokenStorage;
