//! codeassist - a terminal client for an AI code generation and debugging service.
//!
//! The crate wraps the service's HTTP API in a typed client whose request
//! pipeline attaches the stored session token and signs the user out when the
//! service rejects it, plus a timed toast notification engine.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the API façade and notification engine.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing subcommands and terminal output.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "codeassist";
