//! # infradesk-client
//!
//! The single outbound gateway to the inventory backend. Every call goes
//! through [`ApiClient`], which attaches the caller's bearer token and runs
//! one response-inspection step: a 401 or 403 fires the registered
//! [`AuthExpiryHook`] exactly once and comes back as
//! [`ApiOutcome::AuthExpired`].
//!
//! The client never reads session state itself; callers pass the token on
//! every call.

pub mod auth;
pub mod client;
pub mod deployments;
pub mod guard;
pub mod maintenance;
pub mod outcome;
pub mod request;
pub mod resources;

pub use client::ApiClient;
pub use guard::AuthExpiryHook;
pub use outcome::{ApiError, ApiOutcome};
pub use request::{RequestTicket, RequestTracker};
pub use resources::ResourceApi;
pub use auth::Acknowledgement;
