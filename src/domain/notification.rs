//! Timed toast notification.
//!
//! A notification walks `Entering -> Visible -> Exiting -> Removed`. Its
//! progress starts at 100 and loses a fixed amount on every tick so that it
//! reaches 0 when the time-to-live runs out. Time never flows on its own:
//! the owner feeds instants through [`Notification::advance`], which makes
//! the whole lifecycle deterministic under a test clock.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Progress of a freshly shown notification.
pub const FULL_PROGRESS: f64 = 100.0;

/// Notification kind, which drives glyph and color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
    /// Needs attention.
    Warning,
    /// Neutral.
    #[default]
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Lifecycle stage of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Transition in.
    Entering,
    /// On screen, progress decaying.
    Visible,
    /// Transition out.
    Exiting,
    /// Gone; nothing may be read.
    Removed,
}

/// Why a notification started its exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Progress ran out.
    Expired,
    /// User dismissed it.
    Manual,
}

/// Observable state change produced while advancing a notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastEvent {
    /// Enter transition finished.
    Shown,
    /// Progress dropped to the given value.
    Progress(f64),
    /// Exit transition started.
    Exiting(DismissReason),
    /// Exit transition finished; the owner should discard the notification.
    Removed,
}

/// Durations governing a notification's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    /// Time from creation until automatic dismissal.
    pub ttl: Duration,
    /// Interval between progress decrements.
    pub tick: Duration,
    /// Length of the enter transition.
    pub enter: Duration,
    /// Length of the exit transition.
    pub exit: Duration,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(5000),
            tick: Duration::from_millis(50),
            enter: Duration::from_millis(300),
            exit: Duration::from_millis(300),
        }
    }
}

impl ToastTiming {
    /// Progress removed per tick.
    #[must_use]
    pub fn step(&self) -> f64 {
        if self.ttl.is_zero() {
            return FULL_PROGRESS;
        }
        FULL_PROGRESS * self.tick.as_secs_f64() / self.ttl.as_secs_f64()
    }

    fn ticks_within(&self, elapsed: Duration) -> u32 {
        let capped = elapsed.min(self.ttl).as_nanos();
        let tick = self.tick.as_nanos().max(1);
        u32::try_from(capped / tick).unwrap_or(u32::MAX)
    }
}

/// A transient message with a depleting progress bar.
#[derive(Debug, Clone)]
pub struct Notification {
    id: Uuid,
    message: String,
    severity: Severity,
    created_at: DateTime<Utc>,
    timing: ToastTiming,
    phase: ToastPhase,
    progress: f64,
    started: Instant,
    ticks_applied: u32,
    exit_started: Option<Instant>,
    cancelled: bool,
}

impl Notification {
    /// Creates a notification whose timers start at `now`.
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity, now: Instant) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            created_at: Utc::now(),
            timing: ToastTiming::default(),
            phase: ToastPhase::Entering,
            progress: FULL_PROGRESS,
            started: now,
            ticks_applied: 0,
            exit_started: None,
            cancelled: false,
        }
    }

    /// Overrides the default timing.
    #[must_use]
    pub const fn with_timing(mut self, timing: ToastTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Returns the id.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the wall-clock creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timing.
    #[must_use]
    pub const fn timing(&self) -> ToastTiming {
        self.timing
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> ToastPhase {
        self.phase
    }

    /// Remaining progress in `0..=100`, or `None` once removed.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        (self.phase != ToastPhase::Removed).then_some(self.progress)
    }

    /// Returns whether the notification will produce no more events.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cancelled || self.phase == ToastPhase::Removed
    }

    /// Runs every timer that is due at `now`, in order.
    pub fn advance(&mut self, now: Instant) -> Vec<ToastEvent> {
        let mut events = Vec::new();
        if self.is_finished() {
            return events;
        }

        let elapsed = now.saturating_duration_since(self.started);

        if self.phase == ToastPhase::Entering && elapsed >= self.timing.enter {
            self.phase = ToastPhase::Visible;
            events.push(ToastEvent::Shown);
        }

        if self.exit_started.is_none() {
            self.apply_ticks(elapsed, &mut events);
        }

        if self.exit_started.is_none() && elapsed >= self.timing.ttl {
            self.begin_exit(self.started + self.timing.ttl, DismissReason::Expired, &mut events);
        }

        if self
            .exit_started
            .is_some_and(|exit_started| now >= exit_started + self.timing.exit)
        {
            self.phase = ToastPhase::Removed;
            events.push(ToastEvent::Removed);
        }

        events
    }

    /// Dismisses on user request. Progress freezes at its current value.
    pub fn dismiss(&mut self, now: Instant) -> Vec<ToastEvent> {
        let mut events = self.advance(now);
        if !self.is_finished() && self.exit_started.is_none() {
            self.begin_exit(now, DismissReason::Manual, &mut events);
        }
        events
    }

    /// Releases both timers. No state changes after this.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    fn apply_ticks(&mut self, elapsed: Duration, events: &mut Vec<ToastEvent>) {
        let due = self.timing.ticks_within(elapsed);
        let step = self.timing.step();

        while self.ticks_applied < due {
            self.ticks_applied += 1;
            let next = step
                .mul_add(-f64::from(self.ticks_applied), FULL_PROGRESS)
                .max(0.0);

            if next < self.progress {
                self.progress = next;
                events.push(ToastEvent::Progress(next));
            }

            if self.progress <= 0.0 {
                let at = self.started + self.timing.tick * self.ticks_applied;
                self.begin_exit(at, DismissReason::Expired, events);
                return;
            }
        }
    }

    fn begin_exit(&mut self, at: Instant, reason: DismissReason, events: &mut Vec<ToastEvent>) {
        if reason == DismissReason::Expired && self.progress > 0.0 {
            self.progress = 0.0;
            events.push(ToastEvent::Progress(0.0));
        }
        self.phase = ToastPhase::Exiting;
        self.exit_started = Some(at);
        events.push(ToastEvent::Exiting(reason));
    }
}
