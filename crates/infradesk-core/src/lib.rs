//! # infradesk-core
//!
//! Core crate for InfraDesk. Contains the seam traits (session storage,
//! navigation, confirmation), configuration schemas, typed identifiers,
//! user-facing notifications, and the unified error system.
//!
//! This crate has **no** internal dependencies on other InfraDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
