//! What an editor operation did.

use infradesk_core::error::AppError;
use infradesk_core::types::Notification;
use infradesk_entity::Resource;

use super::edit::EditSession;

/// Result of submitting or deleting through [`crate::EntitySync`].
#[derive(Debug)]
pub enum SyncOutcome<R: Resource> {
    /// Created or updated; the list was re-fetched and the editor closed.
    Saved {
        record: R,
        notification: Notification,
    },
    /// The draft matched the original. Nothing was sent; the editor closed.
    Unchanged,
    /// Deleted; the list was re-fetched.
    Deleted { notification: Notification },
    /// The delete was not confirmed. Nothing was sent.
    Cancelled,
    /// Nothing changed locally. `session` is the still-open editor with
    /// its draft intact (absent for deletes).
    Rejected {
        session: Option<EditSession<R>>,
        error: AppError,
        notification: Notification,
    },
}

impl<R: Resource> SyncOutcome<R> {
    /// The notification to show, if the outcome has one.
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Self::Saved { notification, .. }
            | Self::Deleted { notification }
            | Self::Rejected { notification, .. } => Some(notification),
            Self::Unchanged | Self::Cancelled => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// The error behind a rejection.
    pub fn error(&self) -> Option<&AppError> {
        match self {
            Self::Rejected { error, .. } => Some(error),
            _ => None,
        }
    }
}
