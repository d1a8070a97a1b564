//! Maintenance records kept per datacenter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use infradesk_core::types::{DatacenterId, MaintenanceRecordId};

use crate::resource::Resource;

/// A maintenance action performed on something in a datacenter.
///
/// The target is a generic reference: `content_type` names the kind of
/// resource and `object_id` its primary key. `resource_repr` is the
/// backend's rendering of that target and is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    /// Primary key.
    pub id: MaintenanceRecordId,
    /// Short title.
    pub title: String,
    /// What was done.
    pub description: String,
    /// When it was done.
    pub performed_at: DateTime<Utc>,
    /// Target resource key.
    #[serde(default)]
    pub object_id: Option<i64>,
    /// Target resource kind.
    #[serde(default)]
    pub content_type: Option<i64>,
    /// Backend rendering of the target.
    #[serde(default)]
    pub resource_repr: String,
    /// Datacenter the record belongs to.
    pub datacenter: DatacenterId,
}

/// Editable maintenance record fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MaintenanceRecordDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title is required")
    )]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Date is required"))]
    pub performed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Resource is required"))]
    pub object_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Resource type is required"))]
    pub content_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Datacenter is required"))]
    pub datacenter: Option<DatacenterId>,
}

impl MaintenanceRecordDraft {
    /// Point the draft at a resource returned by
    /// `/datacenters/{dc}/resources/`.
    pub fn target(&mut self, resource: &MaintenanceResource) {
        self.object_id = Some(resource.id);
        self.content_type = Some(resource.content_type_id);
    }
}

/// A resource in a datacenter that maintenance can be recorded against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceResource {
    /// Resource key (becomes `object_id`).
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Kind of resource, e.g. `"server"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource kind key (becomes `content_type`).
    pub content_type_id: i64,
}

impl Resource for MaintenanceRecord {
    type Id = MaintenanceRecordId;
    type Draft = MaintenanceRecordDraft;

    const KIND: &'static str = "Maintenance Record";
    const COLLECTION: &'static str = "maintenance";

    fn id(&self) -> MaintenanceRecordId {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn to_draft(&self) -> MaintenanceRecordDraft {
        MaintenanceRecordDraft {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            performed_at: Some(self.performed_at),
            object_id: self.object_id,
            content_type: self.content_type,
            datacenter: Some(self.datacenter),
        }
    }
}
