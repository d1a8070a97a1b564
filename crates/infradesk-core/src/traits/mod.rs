//! Core traits defined in `infradesk-core` and implemented by other crates.

pub mod confirm;
pub mod navigator;
pub mod storage;

pub use confirm::{Confirmation, Preconfirmed};
pub use navigator::Navigator;
pub use storage::KeyValueStore;
