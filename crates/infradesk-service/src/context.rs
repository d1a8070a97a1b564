//! Wiring of the session store, its storage, and the HTTP client.

use std::sync::Arc;

use tracing::info;

use infradesk_auth::{AuthGuard, FileStorage, ForcedLogout, RoleGuard, SessionStore};
use infradesk_client::ApiClient;
use infradesk_core::config::AppConfig;
use infradesk_core::result::AppResult;
use infradesk_core::traits::{KeyValueStore, Navigator};
use infradesk_core::types::DatacenterId;
use infradesk_entity::{Credentials, MaintenanceRecord, Resource, Session};

use crate::deploy::DeploymentService;
use crate::sync::EntitySync;

/// One running console: configuration, a hydrated session store, and a
/// client whose 401/403 responses sign that store out.
#[derive(Debug, Clone)]
pub struct Console {
    pub config: AppConfig,
    pub client: ApiClient,
    pub store: SessionStore,
}

impl Console {
    /// Open file storage at `session.storage_dir` and build the console.
    pub async fn bootstrap(config: AppConfig, navigator: Arc<dyn Navigator>) -> AppResult<Self> {
        let storage = FileStorage::new(&config.session.storage_dir).await?;
        Self::with_storage(config, Arc::new(storage), navigator).await
    }

    /// Build the console over any storage backend, then hydrate.
    pub async fn with_storage(
        config: AppConfig,
        storage: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> AppResult<Self> {
        let store = SessionStore::new(
            storage,
            navigator,
            &config.session,
            config.navigation.clone(),
        );
        let client = ApiClient::new(&config.api)?
            .with_auth_expiry_hook(Arc::new(ForcedLogout::new(store.clone())));

        let restored = store.hydrate().await;
        info!(
            base_url = %client.base_url(),
            signed_in = restored.is_some(),
            "Console ready"
        );

        Ok(Self {
            config,
            client,
            store,
        })
    }

    pub async fn login(&self, credentials: &Credentials) -> AppResult<Session> {
        self.store.login(&self.client, credentials).await
    }

    pub async fn logout(&self) {
        self.store.logout().await;
    }

    pub fn auth_guard(&self) -> AuthGuard {
        AuthGuard::new(self.store.clone())
    }

    pub fn admin_guard(&self) -> RoleGuard {
        RoleGuard::admin_only(self.store.clone())
    }

    /// Sync handle for a whole collection.
    pub fn sync<R: Resource>(&self) -> EntitySync<R> {
        EntitySync::new(self.client.clone(), self.store.clone())
    }

    /// Sync handle for one datacenter's maintenance records.
    pub fn maintenance(&self, datacenter: DatacenterId) -> EntitySync<MaintenanceRecord> {
        EntitySync::for_datacenter(self.client.clone(), self.store.clone(), datacenter)
    }

    pub fn deployments(&self) -> DeploymentService {
        DeploymentService::new(self.client.clone(), self.store.clone())
    }
}
