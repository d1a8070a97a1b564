//! Persisted session configuration.

use serde::{Deserialize, Serialize};

/// Where the authenticated session is persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding persisted client state.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
    /// Reserved key under which the session record is stored.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            storage_key: default_storage_key(),
        }
    }
}

fn default_storage_dir() -> String {
    "data/state".to_string()
}

fn default_storage_key() -> String {
    "auth-storage".to_string()
}
