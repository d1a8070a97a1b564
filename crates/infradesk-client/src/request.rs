//! Tickets for discarding stale responses.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Issued when a request starts. Compare against the tracker when the
/// response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Hands out monotonically increasing tickets for one logical view.
///
/// Only the response carrying the most recent ticket may be applied; an
/// older one that resolves late is dropped.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the latest one issued.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        let current = ticket.0 == self.latest.load(Ordering::SeqCst);
        if !current {
            debug!(ticket = ticket.0, "Dropping stale response");
        }
        current
    }

    /// Supersede every outstanding ticket without starting a request.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}
