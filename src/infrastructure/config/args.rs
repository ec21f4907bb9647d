//! Command-line interface.

use super::app_config::{LogLevel, TokenBackend};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "codeassist",
    version,
    about = "Generate, debug and explain code from the terminal",
    long_about = None
)]
/// Command-line arguments.
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, env = "CODEASSIST_LOG_LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Base URL of the service API.
    #[arg(long, value_name = "URL", env = "CODEASSIST_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Where to keep the session token.
    #[arg(long, value_enum, global = true)]
    pub token_backend: Option<TokenBackend>,

    /// Do not show a toast after the command.
    #[arg(long, global = true)]
    pub no_toast: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the session.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long, env = "CODEASSIST_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in.
    Register {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long, env = "CODEASSIST_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show the signed-in profile.
    Profile,
    /// Change profile fields.
    UpdateProfile {
        /// New display name.
        #[arg(long)]
        name: Option<String>,
        /// New account email.
        #[arg(long)]
        email: Option<String>,
    },
    /// Generate code from a description.
    Generate {
        /// What the code should do.
        prompt: String,
        /// Target language.
        #[arg(short, long, default_value = "javascript")]
        language: String,
        /// Ask for code without comments.
        #[arg(long)]
        no_comments: bool,
    },
    /// Generate a SQL query from a description.
    Sql {
        /// What the query should do.
        prompt: String,
        /// Database engine.
        #[arg(short, long = "database", default_value = "mysql")]
        database_type: String,
    },
    /// Find and fix problems in code.
    Debug {
        /// Where the code comes from.
        #[command(flatten)]
        source: CodeSource,
        /// Language of the code.
        #[arg(short, long, default_value = "javascript")]
        language: String,
        /// Error output the code produced.
        #[arg(short, long = "error")]
        error_message: Option<String>,
    },
    /// Explain what code does.
    Explain {
        /// Where the code comes from.
        #[command(flatten)]
        source: CodeSource,
        /// Language of the code.
        #[arg(short, long, default_value = "javascript")]
        language: String,
    },
    /// Forget the stored session.
    Logout,
}

/// Code given inline or read from a file.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct CodeSource {
    /// Code to send.
    #[arg(long)]
    pub code: Option<String>,
    /// File holding the code.
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let args = CliArgs::try_parse_from(["codeassist", "generate", "sum of evens"]).unwrap();
        let Command::Generate {
            prompt,
            language,
            no_comments,
        } = args.command
        else {
            panic!("expected generate");
        };
        assert_eq!(prompt, "sum of evens");
        assert_eq!(language, "javascript");
        assert!(!no_comments);
    }

    #[test]
    fn test_debug_requires_code_source() {
        assert!(CliArgs::try_parse_from(["codeassist", "debug"]).is_err());
        assert!(
            CliArgs::try_parse_from(["codeassist", "debug", "--code", "x", "--file", "a.py"])
                .is_err()
        );
        assert!(CliArgs::try_parse_from(["codeassist", "debug", "--code", "x"]).is_ok());
    }
}
