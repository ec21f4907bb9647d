//! Subcommand execution.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::application::{CodeAssistClient, LoginRequest, ProfileUpdate, RegisterRequest};
use crate::domain::{ApiError, Severity, StorageError, UserProfile};
use crate::infrastructure::config::{CodeSource, Command};

/// Failure while running a subcommand.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// Service call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Session token could not be removed.
    #[error("Failed to sign out: {0}")]
    Storage(#[from] StorageError),

    /// Code file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    /// Returns whether the login redirect already told the user what to do.
    #[must_use]
    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_session_expired())
    }
}

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Text for stdout.
    pub body: Option<String>,
    /// Toast to show afterwards.
    pub toast: Option<(Severity, String)>,
}

impl CommandOutput {
    fn new(body: impl Into<String>, toast: &str) -> Self {
        Self {
            body: Some(body.into()),
            toast: Some((Severity::Success, toast.to_string())),
        }
    }

    fn toast_only(severity: Severity, toast: impl Into<String>) -> Self {
        Self {
            body: None,
            toast: Some((severity, toast.into())),
        }
    }
}

/// Runs parsed subcommands against the client.
pub struct CommandRunner {
    client: CodeAssistClient,
}

impl CommandRunner {
    /// Creates runner over `client`.
    #[must_use]
    pub const fn new(client: CodeAssistClient) -> Self {
        Self { client }
    }

    /// Executes one subcommand.
    ///
    /// # Errors
    /// Returns error on invalid input or a failed call.
    pub async fn run(&self, command: Command) -> Result<CommandOutput, CommandError> {
        match command {
            Command::Login { email, password } => {
                let response = self.client.login(&LoginRequest::new(email, password)).await?;
                Ok(Self::signed_in(&response.user, response.token_persisted))
            }
            Command::Register {
                name,
                email,
                password,
            } => {
                let response = self
                    .client
                    .register(&RegisterRequest::new(name, email, password))
                    .await?;
                Ok(Self::signed_in(&response.user, response.token_persisted))
            }
            Command::Profile => {
                let profile = self.client.get_profile().await?;
                Ok(CommandOutput {
                    body: Some(Self::describe(&profile)),
                    toast: None,
                })
            }
            Command::UpdateProfile { name, email } => {
                let profile = self
                    .client
                    .update_profile(&ProfileUpdate { name, email })
                    .await?;
                Ok(CommandOutput::new(
                    Self::describe(&profile),
                    "Profile updated successfully!",
                ))
            }
            Command::Generate {
                prompt,
                language,
                no_comments,
            } => {
                require(&prompt, "Please enter a description of what you want to code")?;
                let generated = self
                    .client
                    .generate_code(&prompt, &language, !no_comments)
                    .await?;
                Ok(CommandOutput::new(generated.code, "Code generated successfully!"))
            }
            Command::Sql {
                prompt,
                database_type,
            } => {
                require(
                    &prompt,
                    "Please enter a description of the SQL query you need",
                )?;
                let generated = self.client.generate_sql(&prompt, &database_type).await?;
                Ok(CommandOutput::new(
                    generated.code,
                    "SQL query generated successfully!",
                ))
            }
            Command::Debug {
                source,
                language,
                error_message,
            } => {
                let code = read_source(source)?;
                require(&code, "Please enter some code to debug")?;
                let report = self
                    .client
                    .debug_code(&code, &language, error_message.as_deref())
                    .await?;
                Ok(CommandOutput::new(report.result, "Code debugged successfully!"))
            }
            Command::Explain { source, language } => {
                let code = read_source(source)?;
                require(&code, "Please enter some code to explain")?;
                let explanation = self.client.explain_code(&code, &language).await?;
                Ok(CommandOutput::new(
                    explanation.explanation,
                    "Code explained successfully!",
                ))
            }
            Command::Logout => {
                self.client.logout().await?;
                Ok(CommandOutput::toast_only(Severity::Info, "Signed out"))
            }
        }
    }

    fn signed_in(user: &UserProfile, token_persisted: bool) -> CommandOutput {
        if token_persisted {
            CommandOutput::toast_only(
                Severity::Success,
                format!("Welcome, {}!", user.display_name()),
            )
        } else {
            CommandOutput::toast_only(
                Severity::Warning,
                format!(
                    "Welcome, {}! The session could not be saved and will not survive this run.",
                    user.display_name()
                ),
            )
        }
    }

    fn describe(profile: &UserProfile) -> String {
        let mut lines = vec![
            format!("Name:  {}", profile.name()),
            format!("Email: {}", profile.email()),
        ];
        if let Some(created_at) = profile.created_at() {
            lines.push(format!("Since: {}", created_at.format("%Y-%m-%d")));
        }
        lines.join("\n")
    }
}

fn require(value: &str, message: &str) -> Result<(), CommandError> {
    if value.trim().is_empty() {
        return Err(CommandError::Validation(message.to_string()));
    }
    Ok(())
}

fn read_source(source: CodeSource) -> Result<String, CommandError> {
    match (source.code, source.file) {
        (Some(code), _) => Ok(code),
        (None, Some(path)) => {
            debug!(path = %path.display(), "Reading code from file");
            std::fs::read_to_string(&path).map_err(|source| CommandError::Io { path, source })
        }
        (None, None) => Ok(String::new()),
    }
}
