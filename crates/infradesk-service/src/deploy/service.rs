//! Backend calls behind the deployment views.

use tracing::info;

use infradesk_auth::SessionStore;
use infradesk_client::ApiClient;
use infradesk_core::error::{AppError, ErrorKind};
use infradesk_core::result::AppResult;
use infradesk_core::types::{DeploymentJobId, Notification};
use infradesk_entity::{Datacenter, DeploymentJob, DeploymentLogs};

use crate::selection::{Catalogue, DeploymentWizard};

/// Loads what the wizard needs and submits what it produces.
#[derive(Debug, Clone)]
pub struct DeploymentService {
    client: ApiClient,
    store: SessionStore,
}

impl DeploymentService {
    pub fn new(client: ApiClient, store: SessionStore) -> Self {
        Self { client, store }
    }

    async fn token(&self) -> AppResult<String> {
        self.store
            .token()
            .await
            .ok_or_else(|| AppError::authentication("Please login to deploy VMs."))
    }

    /// Fetch datacenters, clusters, and networks.
    pub async fn catalogue(&self) -> AppResult<Catalogue> {
        let token = self.token().await?;
        let datacenters = self
            .client
            .resource::<Datacenter>(Some(&token))
            .list()
            .await
            .into_result()?;
        let clusters = self.client.clusters(&token).await.into_result()?;
        let networks = self.client.networks(&token).await.into_result()?;

        info!(
            datacenters = datacenters.len(),
            clusters = clusters.len(),
            networks = networks.len(),
            "Loaded deployment catalogue"
        );
        Ok(Catalogue {
            datacenters,
            clusters,
            networks,
        })
    }

    /// A fresh wizard over the current catalogue.
    pub async fn wizard(&self) -> AppResult<DeploymentWizard> {
        Ok(DeploymentWizard::new(self.catalogue().await?))
    }

    /// Submit the wizard's job.
    pub async fn submit(&self, wizard: &DeploymentWizard) -> AppResult<DeploymentJob> {
        let token = self.store.token().await;
        wizard.submit(&self.client, token.as_deref()).await
    }

    pub async fn jobs(&self) -> AppResult<Vec<DeploymentJob>> {
        let token = self.token().await?;
        self.client.deployments(&token).await.into_result()
    }

    pub async fn logs(&self, id: DeploymentJobId) -> AppResult<DeploymentLogs> {
        let token = self.token().await?;
        self.client.deployment_logs(&token, id).await.into_result()
    }
}

/// Notification for a submit result.
pub fn submit_notification(result: &AppResult<DeploymentJob>) -> Notification {
    match result {
        Ok(_) => Notification::success(
            "Deployment Submitted",
            "Your deployment job was submitted successfully. Check logs for more details.",
        ),
        Err(e) if e.kind == ErrorKind::Validation => {
            Notification::error("Missing Configuration", e.message.clone())
        }
        Err(e) if e.kind == ErrorKind::Authentication => {
            Notification::error("Authentication Required", e.message.clone())
        }
        Err(_) => Notification::error(
            "Deployment Failed",
            "Failed to create deployment jobs. Check logs for more details.",
        ),
    }
}
