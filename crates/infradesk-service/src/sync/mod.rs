//! The partial-update protocol shared by every entity editor.

pub mod edit;
pub mod outcome;
pub mod patch;
pub mod service;

pub use edit::EditSession;
pub use outcome::SyncOutcome;
pub use patch::{Patch, compute_patch};
pub use service::EntitySync;
