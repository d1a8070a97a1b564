//! Terminal implementations of the navigation and confirmation seams.

use infradesk_core::config::NavigationConfig;
use infradesk_core::error::AppError;
use infradesk_core::result::AppResult;
use infradesk_core::traits::{Confirmation, Navigator};

use crate::output;

/// Turns route changes into hints on the terminal.
#[derive(Debug, Clone)]
pub struct TerminalNavigator {
    routes: NavigationConfig,
}

impl TerminalNavigator {
    pub fn new(routes: NavigationConfig) -> Self {
        Self { routes }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: &str) {
        tracing::debug!(route, "Navigate");
        if route == self.routes.sign_in_route {
            output::print_warning("You are signed out. Run `infradesk login` to continue.");
        }
    }
}

/// Yes/no prompt on the terminal, defaulting to "no".
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerConfirmation;

impl Confirmation for DialoguerConfirmation {
    fn confirm(&self, prompt: &str) -> AppResult<bool> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))
    }
}
