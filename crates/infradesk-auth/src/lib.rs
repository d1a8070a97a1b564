//! # infradesk-auth
//!
//! Client-side authentication for the InfraDesk console.
//!
//! ## Modules
//!
//! - `session` - the session state machine, its persisted record, and the
//!   forced-logout hook wired into the HTTP client
//! - `guard` - hydration-aware route and role guards

pub mod guard;
pub mod session;

pub use guard::{AuthGuard, GuardDecision, RoleGuard};
pub use session::{
    AuthStatus, FileStorage, ForcedLogout, MemoryStorage, PersistedAuth, SessionStore,
};
