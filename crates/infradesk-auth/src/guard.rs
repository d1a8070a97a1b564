//! Hydration-aware access checks for views.

use infradesk_entity::{Session, UserRole};

use crate::session::SessionStore;

/// What a view should do before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The persisted session has not been loaded yet; decide nothing.
    Pending,
    /// No session; go to the given route.
    Redirect(String),
    /// Signed in, but the role may not see this view.
    Forbidden,
    /// Render with this session.
    Allowed(Session),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}

/// Requires an authenticated session.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    store: SessionStore,
}

impl AuthGuard {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    pub async fn check(&self) -> GuardDecision {
        if !self.store.is_hydrated() {
            return GuardDecision::Pending;
        }
        match self.store.current_session().await {
            Some(session) => GuardDecision::Allowed(session),
            None => GuardDecision::Redirect(self.store.sign_in_route().to_string()),
        }
    }
}

/// Requires an authenticated session whose role is in an allowed set.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    auth: AuthGuard,
    allowed: Vec<UserRole>,
}

impl RoleGuard {
    pub fn new(store: SessionStore, allowed: impl IntoIterator<Item = UserRole>) -> Self {
        Self {
            auth: AuthGuard::new(store),
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Admin-only views (user management).
    pub fn admin_only(store: SessionStore) -> Self {
        Self::new(store, [UserRole::Admin])
    }

    pub async fn check(&self) -> GuardDecision {
        match self.auth.check().await {
            GuardDecision::Allowed(session) if !self.allowed.contains(&session.role) => {
                GuardDecision::Forbidden
            }
            decision => decision,
        }
    }
}
