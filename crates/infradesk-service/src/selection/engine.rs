//! Selection against a loaded catalogue of datacenters, clusters, and
//! networks.

use tracing::debug;

use infradesk_core::error::AppError;
use infradesk_core::result::AppResult;
use infradesk_core::types::{ClusterId, DatacenterId, NetworkId};
use infradesk_entity::{Cluster, Datacenter, Network};

use super::chain::{SelectionAction, SelectionChain, options_for};

/// Everything a deployment can be placed on.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    pub datacenters: Vec<Datacenter>,
    pub clusters: Vec<Cluster>,
    pub networks: Vec<Network>,
}

impl Catalogue {
    pub fn datacenter(&self, id: DatacenterId) -> Option<&Datacenter> {
        self.datacenters.iter().find(|dc| dc.id == id)
    }

    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.id == id)
    }

    pub fn network(&self, id: NetworkId) -> Option<&Network> {
        self.networks.iter().find(|n| n.id == id)
    }
}

/// A [`SelectionChain`] that only accepts choices from the current option
/// lists, so a chosen cluster or network always belongs to the chosen
/// datacenter.
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    catalogue: Catalogue,
    chain: SelectionChain,
}

impl SelectionEngine {
    pub fn new(catalogue: Catalogue) -> Self {
        Self {
            catalogue,
            chain: SelectionChain::default(),
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn chain(&self) -> SelectionChain {
        self.chain
    }

    /// Clusters of the selected datacenter.
    pub fn cluster_options(&self) -> Vec<&Cluster> {
        options_for(&self.catalogue.clusters, self.chain.datacenter)
    }

    /// Networks of the selected datacenter.
    pub fn network_options(&self) -> Vec<&Network> {
        options_for(&self.catalogue.networks, self.chain.datacenter)
    }

    /// Apply a choice after checking it against the options.
    pub fn dispatch(&mut self, action: SelectionAction) -> AppResult<()> {
        match action {
            SelectionAction::SelectDatacenter(Some(id)) if self.catalogue.datacenter(id).is_none() => {
                return Err(AppError::validation(format!("Unknown datacenter {id}")));
            }
            SelectionAction::SelectCluster(Some(id))
                if !self.cluster_options().iter().any(|c| c.id == id) =>
            {
                return Err(AppError::validation(format!(
                    "Cluster {id} is not in the selected datacenter"
                )));
            }
            SelectionAction::SelectNetwork(Some(id))
                if !self.network_options().iter().any(|n| n.id == id) =>
            {
                return Err(AppError::validation(format!(
                    "Network {id} is not in the selected datacenter"
                )));
            }
            _ => {}
        }

        self.chain = self.chain.apply(action);
        debug!(?action, chain = ?self.chain, "Selection changed");
        Ok(())
    }

    pub fn select_datacenter(&mut self, id: Option<DatacenterId>) -> AppResult<()> {
        self.dispatch(SelectionAction::SelectDatacenter(id))
    }

    pub fn select_cluster(&mut self, id: Option<ClusterId>) -> AppResult<()> {
        self.dispatch(SelectionAction::SelectCluster(id))
    }

    pub fn select_network(&mut self, id: Option<NetworkId>) -> AppResult<()> {
        self.dispatch(SelectionAction::SelectNetwork(id))
    }
}
