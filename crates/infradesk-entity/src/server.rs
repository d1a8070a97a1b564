//! Physical server model.

use serde::{Deserialize, Serialize};
use validator::Validate;

use infradesk_core::types::{DatacenterId, ServerId};

use crate::asset_status::AssetStatus;
use crate::resource::Resource;

/// A physical server racked in a datacenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Primary key.
    pub id: ServerId,
    /// Manufacturer serial number.
    pub serial_number: String,
    /// Hardware model.
    pub model: String,
    /// Manufacturer.
    pub manufacturer: String,
    /// Lifecycle status.
    pub status: AssetStatus,
    /// CPU cores.
    pub cpu: i64,
    /// Memory in GB.
    pub ram: i64,
    /// Local storage in GB.
    pub storage: i64,
    /// Management IP address.
    pub ip_address: String,
    /// Owning datacenter.
    pub datacenter: DatacenterId,
}

/// Editable server fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ServerDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        required(message = "Serial number is required"),
        length(min = 1, message = "Serial number is required")
    )]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Model is required"))]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Manufacturer is required"))]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Status is required"))]
    pub status: Option<AssetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "CPU must be at least 1"))]
    pub cpu: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "RAM must be at least 1"))]
    pub ram: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Storage cannot be negative"))]
    pub storage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "IP address is required"))]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Datacenter is required"))]
    pub datacenter: Option<DatacenterId>,
}

impl Resource for Server {
    type Id = ServerId;
    type Draft = ServerDraft;

    const KIND: &'static str = "Server";
    const COLLECTION: &'static str = "servers";

    fn id(&self) -> ServerId {
        self.id
    }

    fn label(&self) -> &str {
        &self.serial_number
    }

    fn to_draft(&self) -> ServerDraft {
        ServerDraft {
            serial_number: Some(self.serial_number.clone()),
            model: Some(self.model.clone()),
            manufacturer: Some(self.manufacturer.clone()),
            status: Some(self.status),
            cpu: Some(self.cpu),
            ram: Some(self.ram),
            storage: Some(self.storage),
            ip_address: Some(self.ip_address.clone()),
            datacenter: Some(self.datacenter),
        }
    }
}
