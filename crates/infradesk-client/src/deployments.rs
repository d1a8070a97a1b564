//! Deployment jobs and the placement catalogue.

use infradesk_core::types::DeploymentJobId;
use infradesk_entity::{Cluster, DeploymentJob, DeploymentLogs, NewDeploymentJob, Network};

use crate::client::ApiClient;
use crate::outcome::ApiOutcome;

impl ApiClient {
    /// `GET /deployments/`
    pub async fn deployments(&self, token: &str) -> ApiOutcome<Vec<DeploymentJob>> {
        self.get("/deployments/", Some(token)).await
    }

    /// `POST /deployments/`
    pub async fn create_deployment(
        &self,
        token: &str,
        job: &NewDeploymentJob,
    ) -> ApiOutcome<DeploymentJob> {
        self.post("/deployments/", Some(token), job).await
    }

    /// `GET /deployments/{id}/logs/`
    pub async fn deployment_logs(
        &self,
        token: &str,
        id: DeploymentJobId,
    ) -> ApiOutcome<DeploymentLogs> {
        self.get(&format!("/deployments/{id}/logs/"), Some(token))
            .await
    }

    /// `GET /clusters/`: every cluster, across all datacenters.
    pub async fn clusters(&self, token: &str) -> ApiOutcome<Vec<Cluster>> {
        self.get("/clusters/", Some(token)).await
    }

    /// `GET /networks/`: every network, across all datacenters.
    pub async fn networks(&self, token: &str) -> ApiOutcome<Vec<Network>> {
        self.get("/networks/", Some(token)).await
    }
}
