//! Presentation layer: subcommands and the terminal toast.

/// Subcommand execution.
pub mod commands;
/// Terminal toast presenter.
pub mod toast;

pub use commands::{CommandError, CommandOutput, CommandRunner};
pub use toast::{ToastView, present};
