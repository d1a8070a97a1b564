//! Disk array model.

use serde::{Deserialize, Serialize};
use validator::Validate;

use infradesk_core::types::{DatacenterId, DiskArrayId};

use crate::asset_status::AssetStatus;
use crate::resource::Resource;

/// A storage array in a datacenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskArray {
    /// Primary key.
    pub id: DiskArrayId,
    /// Manufacturer serial number.
    pub serial_number: String,
    /// Hardware model.
    pub model: String,
    /// Manufacturer.
    pub manufacturer: String,
    /// Lifecycle status.
    pub status: AssetStatus,
    /// Capacity in GB.
    pub storage: i64,
    /// Owning datacenter.
    pub datacenter: DatacenterId,
}

/// Editable disk array fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DiskArrayDraft {
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
    #[validate(range(min = 0, message = "Storage cannot be negative"))]
    pub storage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Datacenter is required"))]
    pub datacenter: Option<DatacenterId>,
}

impl Resource for DiskArray {
    type Id = DiskArrayId;
    type Draft = DiskArrayDraft;

    const KIND: &'static str = "Disk Array";
    const COLLECTION: &'static str = "disk-arrays";

    fn id(&self) -> DiskArrayId {
        self.id
    }

    fn label(&self) -> &str {
        &self.serial_number
    }

    fn to_draft(&self) -> DiskArrayDraft {
        DiskArrayDraft {
            serial_number: Some(self.serial_number.clone()),
            model: Some(self.model.clone()),
            manufacturer: Some(self.manufacturer.clone()),
            status: Some(self.status),
            storage: Some(self.storage),
            datacenter: Some(self.datacenter),
        }
    }
}
