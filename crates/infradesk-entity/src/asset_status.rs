//! Lifecycle status shared by servers and disk arrays.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a physical asset currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// Allocated to a workload.
    InUse,
    /// Out of service for maintenance.
    Maintenance,
    /// Ready to be allocated.
    Available,
}

impl AssetStatus {
    /// Return the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InUse => "in_use",
            Self::Maintenance => "maintenance",
            Self::Available => "available",
        }
    }

    /// Return the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InUse => "In Use",
            Self::Maintenance => "Maintenance",
            Self::Available => "Available",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AssetStatus {
    type Err = infradesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "in_use" => Ok(Self::InUse),
            "maintenance" => Ok(Self::Maintenance),
            "available" => Ok(Self::Available),
            _ => Err(infradesk_core::AppError::validation(format!(
                "Invalid asset status: '{s}'. Expected one of: in_use, maintenance, available"
            ))),
        }
    }
}
