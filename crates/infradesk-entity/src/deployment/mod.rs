//! VM deployment jobs and the topology they target.

pub mod job;
pub mod topology;

pub use job::{DeploymentJob, DeploymentLogs, NewDeploymentJob};
pub use topology::{Cluster, DatacenterScoped, Network};
