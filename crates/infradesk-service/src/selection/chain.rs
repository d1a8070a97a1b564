//! The selection state as a pure reducer.

use infradesk_core::error::AppError;
use infradesk_core::result::AppResult;
use infradesk_core::types::{ClusterId, DatacenterId, NetworkId};
use infradesk_entity::DatacenterScoped;

/// Message shown when a deployment is submitted without full placement.
pub const INCOMPLETE_SELECTION: &str = "Datacenter, Cluster, and Network are required.";

/// Current placement choice. Cluster and network only make sense relative
/// to the datacenter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionChain {
    pub datacenter: Option<DatacenterId>,
    pub cluster: Option<ClusterId>,
    pub network: Option<NetworkId>,
}

/// A user choice in one of the three selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    SelectDatacenter(Option<DatacenterId>),
    SelectCluster(Option<ClusterId>),
    SelectNetwork(Option<NetworkId>),
}

impl SelectionChain {
    /// Next state after `action`. Any datacenter choice resets both
    /// dependents.
    pub fn apply(self, action: SelectionAction) -> Self {
        match action {
            SelectionAction::SelectDatacenter(datacenter) => Self {
                datacenter,
                cluster: None,
                network: None,
            },
            SelectionAction::SelectCluster(cluster) => Self { cluster, ..self },
            SelectionAction::SelectNetwork(network) => Self { network, ..self },
        }
    }

    pub fn is_complete(&self) -> bool {
        self.datacenter.is_some() && self.cluster.is_some() && self.network.is_some()
    }

    /// All three ids, or a `Validation` error.
    pub fn require_complete(&self) -> AppResult<(DatacenterId, ClusterId, NetworkId)> {
        match (self.datacenter, self.cluster, self.network) {
            (Some(datacenter), Some(cluster), Some(network)) => Ok((datacenter, cluster, network)),
            _ => Err(AppError::validation(INCOMPLETE_SELECTION)),
        }
    }
}

/// The entries of `items` owned by `datacenter`; empty when none is chosen.
pub fn options_for<T: DatacenterScoped>(items: &[T], datacenter: Option<DatacenterId>) -> Vec<&T> {
    match datacenter {
        Some(datacenter) => items
            .iter()
            .filter(|item| item.datacenter() == datacenter)
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use infradesk_core::error::ErrorKind;
    use infradesk_entity::Cluster;

    use super::*;

    fn full() -> SelectionChain {
        SelectionChain {
            datacenter: Some(DatacenterId(1)),
            cluster: Some(ClusterId(11)),
            network: Some(NetworkId(21)),
        }
    }

    #[test]
    fn test_datacenter_change_clears_dependents_from_any_state() {
        let states = [
            SelectionChain::default(),
            full(),
            SelectionChain {
                cluster: None,
                ..full()
            },
        ];
        for state in states {
            for target in [None, Some(DatacenterId(1)), Some(DatacenterId(2))] {
                let next = state.apply(SelectionAction::SelectDatacenter(target));
                assert_eq!(next.datacenter, target);
                assert_eq!(next.cluster, None);
                assert_eq!(next.network, None);
            }
        }
    }

    #[test]
    fn test_dependent_choices_keep_datacenter() {
        let state = SelectionChain::default()
            .apply(SelectionAction::SelectDatacenter(Some(DatacenterId(1))))
            .apply(SelectionAction::SelectCluster(Some(ClusterId(11))))
            .apply(SelectionAction::SelectNetwork(Some(NetworkId(21))));
        assert_eq!(state, full());
        assert!(state.is_complete());
    }

    #[test]
    fn test_require_complete_reports_any_missing() {
        for incomplete in [
            SelectionChain { datacenter: None, ..full() },
            SelectionChain { cluster: None, ..full() },
            SelectionChain { network: None, ..full() },
        ] {
            let err = incomplete.require_complete().unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
            assert_eq!(err.message, INCOMPLETE_SELECTION);
        }
        assert!(full().require_complete().is_ok());
    }

    #[test]
    fn test_options_are_exactly_the_datacenters_entries() {
        let clusters = vec![
            Cluster { id: ClusterId(11), name: "c-a".into(), datacenter: DatacenterId(1) },
            Cluster { id: ClusterId(12), name: "c-b".into(), datacenter: DatacenterId(2) },
            Cluster { id: ClusterId(13), name: "c-c".into(), datacenter: DatacenterId(1) },
        ];

        let ids: Vec<_> = options_for(&clusters, Some(DatacenterId(1)))
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![ClusterId(11), ClusterId(13)]);
        assert!(options_for(&clusters, Some(DatacenterId(9))).is_empty());
        assert!(options_for(&clusters, None).is_empty());
    }
}
