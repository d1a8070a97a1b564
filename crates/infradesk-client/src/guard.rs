//! The response-inspection step wrapped around every outbound call.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

/// Runs when the backend signals that the bearer token is no longer valid.
///
/// Implementations clear persisted and in-memory session state and request
/// navigation to the sign-in route. They must not wait for navigation.
#[async_trait]
pub trait AuthExpiryHook: Send + Sync + std::fmt::Debug + 'static {
    /// Called once per failing call with the triggering status.
    async fn on_auth_expired(&self, status: u16);
}

/// Statuses that mean the session is gone.
pub fn is_auth_expired_status(status: u16) -> bool {
    status == 401 || status == 403
}

/// Applies the auth-expiry policy to a response status.
#[derive(Debug, Clone, Default)]
pub(crate) struct AuthGuard {
    hook: Option<Arc<dyn AuthExpiryHook>>,
}

impl AuthGuard {
    pub(crate) fn new(hook: Option<Arc<dyn AuthExpiryHook>>) -> Self {
        Self { hook }
    }

    /// Returns `true` if `status` expired the session, after running the hook.
    pub(crate) async fn inspect(&self, method: &str, path: &str, status: u16) -> bool {
        if !is_auth_expired_status(status) {
            return false;
        }

        warn!(method, path, status, "Backend rejected credentials; forcing logout");
        if let Some(hook) = &self.hook {
            hook.on_auth_expired(status).await;
        }
        true
    }
}
