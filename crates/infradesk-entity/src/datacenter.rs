//! Datacenter model.

use serde::{Deserialize, Serialize};
use validator::Validate;

use infradesk_core::types::DatacenterId;

use crate::resource::Resource;

/// A datacenter site. Root of the deployment selection chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datacenter {
    /// Primary key.
    pub id: DatacenterId,
    /// Display name.
    pub name: String,
    /// Physical location.
    pub location: String,
}

/// Editable datacenter fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DatacenterDraft {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,
    /// New location.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        required(message = "Location is required"),
        length(min = 1, message = "Location is required")
    )]
    pub location: Option<String>,
}

impl Resource for Datacenter {
    type Id = DatacenterId;
    type Draft = DatacenterDraft;

    const KIND: &'static str = "Datacenter";
    const COLLECTION: &'static str = "datacenters";

    fn id(&self) -> DatacenterId {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn subject(&self) -> String {
        format!("\"{}\" datacenter", self.name)
    }

    fn to_draft(&self) -> DatacenterDraft {
        DatacenterDraft {
            name: Some(self.name.clone()),
            location: Some(self.location.clone()),
        }
    }
}
