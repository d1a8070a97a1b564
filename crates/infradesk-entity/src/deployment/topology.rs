//! Clusters and networks, each owned by exactly one datacenter.

use serde::{Deserialize, Serialize};

use infradesk_core::types::{ClusterId, DatacenterId, NetworkId};

/// Anything that hangs off a datacenter.
pub trait DatacenterScoped {
    /// The owning datacenter.
    fn datacenter(&self) -> DatacenterId;
}

/// A compute cluster VMs can be placed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: ClusterId,
    pub name: String,
    pub datacenter: DatacenterId,
}

/// A network VMs can be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: NetworkId,
    pub name: String,
    /// Address range, e.g. `10.0.0.0/24`.
    pub cidr: String,
    pub datacenter: DatacenterId,
}

impl Network {
    /// `name (cidr)`, as shown in option lists.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.cidr)
    }
}

impl DatacenterScoped for Cluster {
    fn datacenter(&self) -> DatacenterId {
        self.datacenter
    }
}

impl DatacenterScoped for Network {
    fn datacenter(&self) -> DatacenterId {
        self.datacenter
    }
}
