//! Navigation port.

/// Route users are sent to when their session ends.
pub const LOGIN_ROUTE: &str = "/login";

/// Port for forced navigation away from the current view.
pub trait NavigatorPort: Send + Sync {
    /// Leaves the current view for `route`.
    fn redirect(&self, route: &str);
}
