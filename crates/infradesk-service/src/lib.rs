//! # infradesk-service
//!
//! Use cases the console views are built on. Services take their
//! dependencies at construction time and read the bearer token from the
//! [`infradesk_auth::SessionStore`] on every call.
//!
//! ## Modules
//!
//! - `sync` - diff/patch editing shared by every entity editor
//! - `selection` - datacenter → cluster/network cascading selection
//! - `deploy` - the deployment wizard's backend calls
//! - `context` - wiring of storage, session store, and HTTP client

pub mod context;
pub mod deploy;
pub mod selection;
pub mod sync;

pub use context::Console;
pub use deploy::{DeploymentService, submit_notification};
pub use selection::{
    Catalogue, DeploymentForm, DeploymentWizard, SelectionAction, SelectionChain,
    SelectionEngine, WizardStep,
};
pub use sync::{EditSession, EntitySync, Patch, SyncOutcome, compute_patch};
