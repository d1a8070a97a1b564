//! Cascading datacenter → cluster/network selection and the deployment
//! wizard built on it.

pub mod chain;
pub mod engine;
pub mod wizard;

pub use chain::{SelectionAction, SelectionChain, options_for};
pub use engine::{Catalogue, SelectionEngine};
pub use wizard::{DeploymentForm, DeploymentWizard, WizardStep};
