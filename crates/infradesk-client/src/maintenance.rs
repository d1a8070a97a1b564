//! Datacenter-scoped maintenance endpoints.

use infradesk_core::types::DatacenterId;
use infradesk_entity::{MaintenanceRecord, MaintenanceResource};

use crate::client::ApiClient;
use crate::outcome::ApiOutcome;

/// `/maintenance/by-datacenter/{dc}/`
pub fn records_path(datacenter: DatacenterId) -> String {
    format!("/maintenance/by-datacenter/{datacenter}/")
}

impl ApiClient {
    /// Maintenance records belonging to one datacenter.
    pub async fn maintenance_by_datacenter(
        &self,
        token: &str,
        datacenter: DatacenterId,
    ) -> ApiOutcome<Vec<MaintenanceRecord>> {
        self.get(&records_path(datacenter), Some(token)).await
    }

    /// Everything in a datacenter that maintenance can target.
    pub async fn datacenter_resources(
        &self,
        token: &str,
        datacenter: DatacenterId,
    ) -> ApiOutcome<Vec<MaintenanceResource>> {
        self.get(&format!("/datacenters/{datacenter}/resources/"), Some(token))
            .await
    }
}
