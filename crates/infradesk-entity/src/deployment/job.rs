//! Deployment job records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use infradesk_core::types::{ClusterId, DatacenterId, DeploymentJobId, NetworkId};

/// A submitted deployment job as listed under `/deployments/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentJob {
    pub id: DeploymentJobId,
    pub name: String,
    /// VM name, or name prefix when `vm_count > 1`.
    pub vm_name: String,
    pub vm_count: i64,
    /// CPU cores per VM.
    pub cpu: i64,
    /// Memory per VM in MB.
    pub memory: i64,
    #[serde(default)]
    pub datastore: String,
    #[serde(default)]
    pub datacenter: Option<DatacenterId>,
    #[serde(default)]
    pub cluster: Option<ClusterId>,
    #[serde(default)]
    pub network: Option<NetworkId>,
    /// Backend execution status (e.g. `pending`, `running`, `success`).
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /deployments/`. Every placement field is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDeploymentJob {
    pub name: String,
    pub vm_name: String,
    pub vm_count: i64,
    pub cpu: i64,
    pub memory: i64,
    pub datastore: String,
    pub datacenter: DatacenterId,
    pub cluster: ClusterId,
    pub network: NetworkId,
}

/// Body of `GET /deployments/{id}/logs/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentLogs {
    #[serde(default)]
    pub logs: Option<String>,
}

impl DeploymentLogs {
    /// The log text, or a placeholder when the job has produced none.
    pub fn text(&self) -> &str {
        match self.logs.as_deref() {
            Some(logs) if !logs.is_empty() => logs,
            _ => "No logs found.",
        }
    }
}
