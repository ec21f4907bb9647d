//! Terminal navigator.

use std::io::Write;

use crossterm::style::Stylize;
use parking_lot::Mutex;
use tracing::warn;

use crate::domain::ports::{LOGIN_ROUTE, NavigatorPort};

/// Sends the user back to the login command.
///
/// A terminal has no location bar, so the redirect is a prompt naming the
/// command to run. Every redirect prints one prompt.
pub struct ConsoleNavigator {
    program: String,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleNavigator {
    /// Creates a navigator that prompts on stderr.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_writer(program, Box::new(std::io::stderr()))
    }

    /// Creates a navigator that prompts on the given writer.
    #[must_use]
    pub fn with_writer(program: impl Into<String>, out: Box<dyn Write + Send>) -> Self {
        Self {
            program: program.into(),
            out: Mutex::new(out),
        }
    }

    fn command_for(&self, route: &str) -> String {
        let subcommand = route.trim_start_matches('/');
        format!("{} {subcommand}", self.program)
    }

    fn prompt_for(&self, route: &str) -> String {
        if route == LOGIN_ROUTE {
            format!(
                "Signed out. Run `{}` to sign in again.",
                self.command_for(route)
            )
        } else {
            format!("Continue with `{}`.", self.command_for(route))
        }
    }
}

impl std::fmt::Debug for ConsoleNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleNavigator")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

impl NavigatorPort for ConsoleNavigator {
    fn redirect(&self, route: &str) {
        warn!(route, "Redirecting");
        let line = self.prompt_for(route);
        let mut out = self.out.lock();
        if let Err(e) = writeln!(out, "{}", line.yellow()) {
            warn!(error = %e, "Failed to print redirect prompt");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_route_maps_to_subcommand() {
        let navigator = ConsoleNavigator::new("codeassist");
        assert_eq!(navigator.command_for(LOGIN_ROUTE), "codeassist login");
    }

    #[test]
    fn test_every_redirect_prompts() {
        let buffer = SharedBuffer::default();
        let navigator = ConsoleNavigator::with_writer("codeassist", Box::new(buffer.clone()));

        navigator.redirect(LOGIN_ROUTE);
        navigator.redirect(LOGIN_ROUTE);

        let printed = String::from_utf8_lossy(&buffer.0.lock()).into_owned();
        assert_eq!(printed.matches("Signed out.").count(), 2);
        assert!(printed.contains("`codeassist login`"));
    }

    #[test]
    fn test_other_route_prompt() {
        let navigator = ConsoleNavigator::new("codeassist");
        assert_eq!(navigator.prompt_for("/profile"), "Continue with `codeassist profile`.");
    }
}
