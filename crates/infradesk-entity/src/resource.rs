//! The contract shared by every editable kind.

use std::fmt::{Debug, Display};

use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

/// A backend collection the console can list, create, patch, and delete.
pub trait Resource: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Typed primary key.
    type Id: Copy + Eq + Display + Debug + Send + Sync + 'static;

    /// Form state with every field optional. `Validate` carries the
    /// required-field rules checked before a create.
    type Draft: Serialize + Default + Clone + Debug + Validate + Send + Sync + 'static;

    /// Human-readable kind, e.g. `"Datacenter"` or `"Disk Array"`.
    const KIND: &'static str;

    /// Collection path segment, e.g. `"datacenters"` for `/datacenters/`.
    const COLLECTION: &'static str;

    /// Primary key of this record.
    fn id(&self) -> Self::Id;

    /// Label used in notifications (name, serial number, title...).
    fn label(&self) -> &str;

    /// A draft pre-filled with every field of this record.
    fn to_draft(&self) -> Self::Draft;

    /// How notifications refer to this record.
    fn subject(&self) -> String {
        format!("\"{}\"", self.label())
    }
}
