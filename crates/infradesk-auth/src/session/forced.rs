//! The forced-logout hook installed on the HTTP client.

use async_trait::async_trait;

use infradesk_client::AuthExpiryHook;

use super::store::SessionStore;

/// Signs the user out when any call comes back 401 or 403.
///
/// Holds a handle to the store, never the other way round, so the client
/// and the store can share it without a reference cycle.
#[derive(Debug, Clone)]
pub struct ForcedLogout {
    store: SessionStore,
}

impl ForcedLogout {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthExpiryHook for ForcedLogout {
    async fn on_auth_expired(&self, status: u16) {
        self.store.expire(status).await;
    }
}
