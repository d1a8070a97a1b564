//! Navigation routes.

use serde::{Deserialize, Serialize};

/// Routes the session layer navigates to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Sign-in entry point; target of forced logout.
    #[serde(default = "default_sign_in")]
    pub sign_in_route: String,
    /// Default view after a successful login.
    #[serde(default = "default_landing")]
    pub landing_route: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sign_in_route: default_sign_in(),
            landing_route: default_landing(),
        }
    }
}

fn default_sign_in() -> String {
    "/signin".to_string()
}

fn default_landing() -> String {
    "/".to_string()
}
