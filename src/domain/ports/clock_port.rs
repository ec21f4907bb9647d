//! Time source port.

use std::time::Instant;

/// Source of monotonic time for timer-driven state.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}
