//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use super::storage::ConfigError;
use crate::domain::ToastTiming;
use crate::infrastructure::http::DEFAULT_API_BASE;

pub(crate) const APP_NAME: &str = "codeassist";
pub(crate) const APP_QUALIFIER: &str = "dev";
pub(crate) const APP_ORGANIZATION: &str = "codeassist";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warning level.
    #[default]
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where the session token is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    /// System keyring.
    #[default]
    Keyring,
    /// TOML file in the data directory.
    File,
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Base URL of the service API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Token persistence backend.
    #[serde(default)]
    pub token_backend: TokenBackend,

    /// Notification configuration.
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Show toasts after commands.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Time a toast stays up, in milliseconds.
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,

    /// Progress update interval, in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Exit transition length, in milliseconds.
    #[serde(default = "default_exit_ms")]
    pub exit_ms: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_ms: default_ttl_ms(),
            tick_ms: default_tick_ms(),
            exit_ms: default_exit_ms(),
        }
    }
}

impl NotificationsConfig {
    /// Converts to toast timing. Zero values fall back to the defaults.
    #[must_use]
    pub fn timing(&self) -> ToastTiming {
        let defaults = ToastTiming::default();
        let or_default = |ms: u64, fallback: Duration| {
            if ms == 0 {
                fallback
            } else {
                Duration::from_millis(ms)
            }
        };

        ToastTiming {
            ttl: or_default(self.ttl_ms, defaults.ttl),
            tick: or_default(self.tick_ms, defaults.tick),
            enter: defaults.enter,
            exit: or_default(self.exit_ms, defaults.exit),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_BASE.to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_true() -> bool {
    true
}

const fn default_ttl_ms() -> u64 {
    5000
}

const fn default_tick_ms() -> u64 {
    50
}

const fn default_exit_ms() -> u64 {
    300
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::default(),
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            token_backend: TokenBackend::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Merges CLI arguments (and their environment fallbacks) into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = &args.api_url {
            self.api_url.clone_from(api_url);
        }
        if let Some(token_backend) = args.token_backend {
            self.token_backend = token_backend;
        }
        if args.no_toast {
            self.notifications.enabled = false;
        }
    }

    /// Returns effective log path. Logging goes to a file only when asked for.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone()
    }

    /// Returns the per-request timeout. Zero falls back to the default.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        if self.request_timeout_secs == 0 {
            Duration::from_secs(default_request_timeout())
        } else {
            Duration::from_secs(self.request_timeout_secs)
        }
    }

    /// Returns the origin tokens are scoped to, e.g. `http://localhost:5000`.
    ///
    /// # Errors
    /// Returns error if `api_url` is not an absolute http(s) URL.
    pub fn api_origin(&self) -> Result<String, ConfigError> {
        let url = Url::parse(&self.api_url)
            .map_err(|e| ConfigError::InvalidApiUrl(format!("{}: {e}", self.api_url)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl(format!(
                "{}: unsupported scheme",
                self.api_url
            )));
        }

        Ok(url.origin().ascii_serialization())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.notifications.timing(), ToastTiming::default());
    }

    #[test]
    fn test_zero_request_timeout_uses_default() {
        let config: AppConfig = toml::from_str("request_timeout_secs = 0\n").unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));

        let config = AppConfig {
            request_timeout_secs: 5,
            ..AppConfig::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_api_origin_strips_path() {
        let config = AppConfig {
            api_url: "https://api.example.com:8443/v1/api".into(),
            ..AppConfig::default()
        };
        assert_eq!(config.api_origin().unwrap(), "https://api.example.com:8443");
    }

    #[test]
    fn test_api_origin_rejects_non_http() {
        let config = AppConfig {
            api_url: "file:///tmp/api".into(),
            ..AppConfig::default()
        };
        assert!(matches!(config.api_origin(), Err(ConfigError::InvalidApiUrl(_))));
    }

    #[test]
    fn test_zero_timing_values_use_defaults() {
        let notifications = NotificationsConfig {
            enabled: true,
            ttl_ms: 0,
            tick_ms: 100,
            exit_ms: 0,
        };
        let timing = notifications.timing();
        assert_eq!(timing.ttl, Duration::from_millis(5000));
        assert_eq!(timing.tick, Duration::from_millis(100));
        assert_eq!(timing.exit, Duration::from_millis(300));
    }

    #[test]
    fn test_merge_with_args() {
        let args = CliArgs::try_parse_from([
            "codeassist",
            "--api-url",
            "https://example.com/api",
            "--token-backend",
            "file",
            "--no-toast",
            "logout",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        config.merge_with_args(&args);

        assert_eq!(config.api_url, "https://example.com/api");
        assert_eq!(config.token_backend, TokenBackend::File);
        assert!(!config.notifications.enabled);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("api_url = \"http://10.0.0.2/api\"\n").unwrap();
        assert_eq!(config.api_url, "http://10.0.0.2/api");
        assert_eq!(config.token_backend, TokenBackend::Keyring);
        assert!(config.notifications.enabled);
    }
}
