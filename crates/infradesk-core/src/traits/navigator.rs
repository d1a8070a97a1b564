//! Navigation seam between the session layer and the view layer.

/// Moves the view layer to a route.
///
/// `navigate` must return immediately: it requests navigation, it does not
/// wait for it. The forced-logout path relies on this to hand the original
/// error back to the caller without blocking.
pub trait Navigator: Send + Sync + std::fmt::Debug + 'static {
    /// Request navigation to `route`.
    fn navigate(&self, route: &str);
}
