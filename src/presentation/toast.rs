//! Terminal toast presenter.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use crossterm::style::{Color, PrintStyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue};
use parking_lot::Mutex;
use tracing::debug;

use crate::application::{NotificationCenter, ToastTicker};
use crate::domain::{Notification, Severity, ToastEvent, ToastPhase};

const BAR_WIDTH: usize = 20;

/// Single-line rendering of a notification.
pub struct ToastView<'a> {
    notification: &'a Notification,
}

impl<'a> ToastView<'a> {
    /// Creates view of `notification`.
    #[must_use]
    pub const fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }

    /// Returns the severity glyph.
    #[must_use]
    pub const fn glyph(severity: Severity) -> &'static str {
        match severity {
            Severity::Success => "✔",
            Severity::Error => "✖",
            Severity::Warning => "!",
            Severity::Info => "i",
        }
    }

    /// Returns the severity color.
    #[must_use]
    pub const fn color(severity: Severity) -> Color {
        match severity {
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
            Severity::Info => Color::Blue,
        }
    }

    /// Progress bar; empty once the notification is gone.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn bar(&self) -> String {
        let Some(progress) = self.notification.progress() else {
            return String::new();
        };
        let filled = ((progress / 100.0) * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
    }

    /// Plain text of the toast, without styling.
    #[must_use]
    pub fn text(&self) -> String {
        let glyph = Self::glyph(self.notification.severity());
        let dim = matches!(self.notification.phase(), ToastPhase::Exiting);
        let message = self.notification.message();
        if dim {
            format!("{glyph} {message}")
        } else {
            format!("{glyph} {message}  {}", self.bar())
        }
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let color = Self::color(self.notification.severity());
        let styled = if self.notification.phase() == ToastPhase::Exiting {
            self.text().with(color).dim()
        } else {
            self.text().with(color)
        };
        queue!(
            out,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            PrintStyledContent(styled)
        )?;
        out.flush()
    }
}

fn clear(out: &mut impl Write) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveToColumn(0),
        Clear(ClearType::CurrentLine)
    )?;
    out.flush()
}

/// Shows the current notification on stderr until it is removed.
///
/// Ctrl-C dismisses it early.
///
/// # Errors
/// Returns error if writing to the terminal fails.
pub async fn present(center: Arc<Mutex<NotificationCenter>>, tick: Duration) -> io::Result<()> {
    let mut out = io::stderr();
    let (ticker, mut events) = ToastTicker::spawn(Arc::clone(&center), tick);

    loop {
        if let Some(notification) = center.lock().current() {
            ToastView::new(notification).draw(&mut out)?;
        }

        tokio::select! {
            event = events.recv() => match event {
                Some(ToastEvent::Removed) | None => break,
                Some(_) => {}
            },
            _ = tokio::signal::ctrl_c() => {
                debug!("Toast dismissed from keyboard");
                center.lock().dismiss();
            }
        }
    }

    drop(ticker);
    clear(&mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_full_bar_for_new_notification() {
        let n = Notification::new("Code generated successfully!", Severity::Success, Instant::now());
        let view = ToastView::new(&n);

        assert_eq!(view.bar(), "█".repeat(BAR_WIDTH));
        assert!(view.text().starts_with("✔ Code generated successfully!"));
    }

    #[test]
    fn test_bar_tracks_progress() {
        let start = Instant::now();
        let mut n = Notification::new("x", Severity::Info, start);
        n.advance(start + Duration::from_millis(2500));

        let bar = ToastView::new(&n).bar();
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_exiting_hides_bar() {
        let start = Instant::now();
        let mut n = Notification::new("Failed to debug code", Severity::Error, start);
        n.dismiss(start + Duration::from_millis(10));

        assert_eq!(ToastView::new(&n).text(), "✖ Failed to debug code");
    }

    #[test]
    fn test_draw_writes_message() {
        let n = Notification::new("hello", Severity::Warning, Instant::now());
        let mut buffer = Vec::new();

        ToastView::new(&n).draw(&mut buffer).unwrap();

        assert!(String::from_utf8_lossy(&buffer).contains("! hello"));
    }
}
