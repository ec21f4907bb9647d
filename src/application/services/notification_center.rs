//! Host for the visible notification.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::Clock;
use crate::domain::{Notification, Severity, ToastEvent, ToastTiming};

/// Invoked once when a notification has finished its exit transition.
pub type CompletionCallback = Box<dyn FnOnce(&Notification) + Send>;

struct ActiveToast {
    notification: Notification,
    on_complete: Option<CompletionCallback>,
}

/// Hosts the single visible notification of one mount point.
///
/// A new notification replaces the current one, which is cancelled without
/// its completion callback.
pub struct NotificationCenter {
    clock: Arc<dyn Clock>,
    timing: ToastTiming,
    current: Option<ActiveToast>,
}

impl NotificationCenter {
    /// Creates an empty center.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, timing: ToastTiming) -> Self {
        Self {
            clock,
            timing,
            current: None,
        }
    }

    /// Shows a notification, returning its id.
    pub fn notify(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        on_complete: Option<CompletionCallback>,
    ) -> Uuid {
        self.unmount();

        let notification =
            Notification::new(message, severity, self.clock.now()).with_timing(self.timing);
        let id = notification.id();
        debug!(%id, %severity, "Notification shown");

        self.current = Some(ActiveToast {
            notification,
            on_complete,
        });
        id
    }

    /// Shows a success notification.
    pub fn success(&mut self, message: impl Into<String>) -> Uuid {
        self.notify(Severity::Success, message, None)
    }

    /// Shows an error notification.
    pub fn error(&mut self, message: impl Into<String>) -> Uuid {
        self.notify(Severity::Error, message, None)
    }

    /// Shows a warning notification.
    pub fn warning(&mut self, message: impl Into<String>) -> Uuid {
        self.notify(Severity::Warning, message, None)
    }

    /// Shows an info notification.
    pub fn info(&mut self, message: impl Into<String>) -> Uuid {
        self.notify(Severity::Info, message, None)
    }

    /// Runs due timers and reports what changed.
    pub fn tick(&mut self) -> Vec<ToastEvent> {
        let now = self.clock.now();
        let Some(active) = self.current.as_mut() else {
            return Vec::new();
        };

        let events = active.notification.advance(now);
        self.finish_if_removed(&events);
        events
    }

    /// Dismisses the current notification on user request.
    pub fn dismiss(&mut self) -> Vec<ToastEvent> {
        let now = self.clock.now();
        let Some(active) = self.current.as_mut() else {
            return Vec::new();
        };

        debug!(id = %active.notification.id(), "Notification dismissed");
        let events = active.notification.dismiss(now);
        self.finish_if_removed(&events);
        events
    }

    /// Tears the current notification down without notifying its owner.
    pub fn unmount(&mut self) {
        if let Some(mut active) = self.current.take() {
            active.notification.cancel();
            debug!(id = %active.notification.id(), "Notification unmounted");
        }
    }

    /// Returns the notification on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|active| &active.notification)
    }

    /// Returns whether a notification is on screen.
    #[must_use]
    pub const fn has_notification(&self) -> bool {
        self.current.is_some()
    }

    fn finish_if_removed(&mut self, events: &[ToastEvent]) {
        if !events.contains(&ToastEvent::Removed) {
            return;
        }
        if let Some(mut active) = self.current.take() {
            debug!(id = %active.notification.id(), "Notification removed");
            if let Some(callback) = active.on_complete.take() {
                callback(&active.notification);
            }
        }
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        self.unmount();
    }
}
