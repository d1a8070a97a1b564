//! Interactive yes/no gate for destructive operations.

use crate::result::AppResult;

/// Asks the user to confirm an action.
pub trait Confirmation: Send + Sync {
    /// Returns `Ok(true)` only on an explicit "yes".
    fn confirm(&self, prompt: &str) -> AppResult<bool>;
}

/// A fixed answer, for non-interactive use (`--yes`) and tests.
#[derive(Debug, Clone, Copy)]
pub struct Preconfirmed(pub bool);

impl Confirmation for Preconfirmed {
    fn confirm(&self, _prompt: &str) -> AppResult<bool> {
        Ok(self.0)
    }
}
