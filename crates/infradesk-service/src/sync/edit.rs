//! An open editor: the original snapshot and the in-progress draft.

use serde_json::Value;

use infradesk_core::result::AppResult;
use infradesk_entity::Resource;

use super::patch::{Patch, compute_patch, diff};

/// The editor state for one record.
///
/// Both halves live and die together. Dropping the session discards the
/// draft; [`crate::EntitySync::submit`] consumes it and hands it back only
/// when the change was rejected.
#[derive(Debug, Clone)]
pub struct EditSession<R: Resource> {
    original: Option<R>,
    draft: R::Draft,
}

impl<R: Resource> EditSession<R> {
    /// Editor for a new record, starting from an empty draft.
    pub fn create() -> Self {
        Self {
            original: None,
            draft: R::Draft::default(),
        }
    }

    /// Editor for an existing record, pre-filled from it.
    pub fn edit(original: &R) -> Self {
        Self {
            draft: original.to_draft(),
            original: Some(original.clone()),
        }
    }

    /// The snapshot being edited, `None` when creating.
    pub fn original(&self) -> Option<&R> {
        self.original.as_ref()
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut R::Draft {
        &mut self.draft
    }

    /// What would be sent: the patch against the original when editing,
    /// every set field when creating.
    pub fn changes(&self) -> AppResult<Patch> {
        match &self.original {
            Some(original) => compute_patch(original, &self.draft),
            None => Ok(diff(&Value::Null, &serde_json::to_value(&self.draft)?)),
        }
    }
}
