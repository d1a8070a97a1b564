//! The authenticated-session state machine.
//!
//! `unauthenticated → authenticating → authenticated`, with the session
//! record persisted under a single key and reloaded once at startup.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{OnceCell, RwLock};
use tracing::{error, info, warn};

use infradesk_client::{ApiClient, ApiError, ApiOutcome};
use infradesk_core::config::{NavigationConfig, SessionConfig};
use infradesk_core::error::AppError;
use infradesk_core::result::AppResult;
use infradesk_core::traits::{KeyValueStore, Navigator};
use infradesk_entity::{Credentials, Session, validation};

/// Shown when the backend rejects a login without saying why.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";

/// Shown when the backend could not be reached during login.
pub const UNREACHABLE_MESSAGE: &str = "Unable to reach the server. Please check your connection.";

/// Where the store is in the login lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Unauthenticated,
    Authenticating,
    Authenticated,
}

/// The record written under the storage key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAuth {
    pub user: Option<Session>,
}

#[derive(Debug)]
struct AuthState {
    status: AuthStatus,
    session: Option<Session>,
    last_error: Option<String>,
}

struct StoreInner {
    state: RwLock<AuthState>,
    /// Set exactly once, after the persisted record is loaded.
    hydration: OnceCell<()>,
    storage: Arc<dyn KeyValueStore>,
    navigator: Arc<dyn Navigator>,
    storage_key: String,
    routes: NavigationConfig,
}

/// Shared handle to the session state. Clones observe the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("storage_key", &self.inner.storage_key)
            .field("hydrated", &self.is_hydrated())
            .finish()
    }
}

impl SessionStore {
    /// Create an unhydrated store. Call [`SessionStore::hydrate`] before
    /// making any authorization decision.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
        session_config: &SessionConfig,
        routes: NavigationConfig,
    ) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(AuthState {
                    status: AuthStatus::Unauthenticated,
                    session: None,
                    last_error: None,
                }),
                hydration: OnceCell::new(),
                storage,
                navigator,
                storage_key: session_config.storage_key.clone(),
                routes,
            }),
        }
    }

    /// Load the persisted session, then mark the store hydrated.
    ///
    /// Only the first call reads storage; concurrent callers wait for it.
    /// A record that cannot be read or parsed counts as "no session" and
    /// is removed.
    pub async fn hydrate(&self) -> Option<Session> {
        self.inner
            .hydration
            .get_or_init(|| async {
                let restored = self.load_persisted().await;
                let signed_in = restored.is_some();
                if let Some(session) = restored {
                    let mut state = self.inner.state.write().await;
                    state.status = AuthStatus::Authenticated;
                    state.session = Some(session);
                }
                info!(restored = signed_in, "Session store hydrated");
            })
            .await;
        self.current_session().await
    }

    async fn load_persisted(&self) -> Option<Session> {
        let key = self.inner.storage_key.as_str();
        let raw = match self.inner.storage.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                error!(key, error = %e, "Failed to read persisted session");
                return None;
            }
        };

        match serde_json::from_str::<PersistedAuth>(&raw) {
            Ok(PersistedAuth {
                user: Some(session),
            }) if session.is_complete() => Some(session),
            Ok(PersistedAuth { user: None }) => None,
            Ok(_) => {
                warn!(key, "Persisted session is incomplete; discarding");
                self.remove_persisted().await;
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Persisted session is corrupt; discarding");
                self.remove_persisted().await;
                None
            }
        }
    }

    /// Whether the persisted record has been loaded.
    pub fn is_hydrated(&self) -> bool {
        self.inner.hydration.initialized()
    }

    pub async fn status(&self) -> AuthStatus {
        self.inner.state.read().await.status
    }

    /// The authenticated session, if any.
    pub async fn current_session(&self) -> Option<Session> {
        self.inner.state.read().await.session.clone()
    }

    /// Bearer token of the current session.
    pub async fn token(&self) -> Option<String> {
        self.inner
            .state
            .read()
            .await
            .session
            .as_ref()
            .map(|s| s.token.clone())
    }

    /// Message of the most recent failed login, cleared by the next attempt.
    pub async fn last_error(&self) -> Option<String> {
        self.inner.state.read().await.last_error.clone()
    }

    /// Run the two-step login exchange.
    ///
    /// 1. `POST /login/` for an access token
    /// 2. `GET /me/` with that token for the profile
    ///
    /// The session is only stored once both succeed; a token from step 1
    /// is dropped if step 2 fails. The failure message is kept for
    /// [`SessionStore::last_error`] and also returned.
    pub async fn login(&self, client: &ApiClient, credentials: &Credentials) -> AppResult<Session> {
        {
            let mut state = self.inner.state.write().await;
            if state.status == AuthStatus::Authenticating {
                return Err(AppError::conflict("A login is already in progress"));
            }
            state.status = AuthStatus::Authenticating;
            state.last_error = None;
        }

        info!(username = %credentials.username, "Logging in");

        if let Err(e) = validation::check(credentials) {
            return Err(self.fail(e.message).await);
        }

        let token = match client.login(credentials).await {
            ApiOutcome::Ok(response) => response.access_token,
            ApiOutcome::AuthExpired { .. } => {
                return Err(self.fail(LOGIN_FAILED_MESSAGE.to_string()).await);
            }
            ApiOutcome::Error(err) => return Err(self.fail(login_failure_message(&err)).await),
        };

        let profile = match client.me(&token).await {
            ApiOutcome::Ok(me) => me.user,
            ApiOutcome::AuthExpired { .. } => {
                return Err(self.fail(LOGIN_FAILED_MESSAGE.to_string()).await);
            }
            ApiOutcome::Error(err) => return Err(self.fail(login_failure_message(&err)).await),
        };

        let session = match Session::from_login(credentials.username.clone(), token, profile) {
            Ok(session) => session,
            Err(e) => return Err(self.fail(e.message).await),
        };

        self.persist(&session).await;
        {
            let mut state = self.inner.state.write().await;
            state.status = AuthStatus::Authenticated;
            state.session = Some(session.clone());
            state.last_error = None;
        }

        info!(user_id = %session.id, role = %session.role, "Login succeeded");
        self.inner.navigator.navigate(&self.inner.routes.landing_route);
        Ok(session)
    }

    async fn fail(&self, message: String) -> AppError {
        warn!(reason = %message, "Login failed");
        let mut state = self.inner.state.write().await;
        state.status = AuthStatus::Unauthenticated;
        state.session = None;
        state.last_error = Some(message.clone());
        AppError::authentication(message)
    }

    /// Explicit logout: clear the persisted record and the in-memory
    /// session, then go to the sign-in route.
    pub async fn logout(&self) {
        info!("Logging out");
        self.clear().await;
        self.inner.navigator.navigate(&self.inner.routes.sign_in_route);
    }

    /// Forced logout after the backend rejected the token.
    pub async fn expire(&self, status: u16) {
        warn!(status, "Session expired; signing out");
        self.clear().await;
        self.inner.navigator.navigate(&self.inner.routes.sign_in_route);
    }

    async fn clear(&self) {
        self.remove_persisted().await;
        let mut state = self.inner.state.write().await;
        state.session = None;
        if state.status == AuthStatus::Authenticated {
            state.status = AuthStatus::Unauthenticated;
        }
    }

    async fn persist(&self, session: &Session) {
        let record = PersistedAuth {
            user: Some(session.clone()),
        };
        let result = match serde_json::to_string(&record) {
            Ok(json) => self.inner.storage.set(&self.inner.storage_key, &json).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            error!(error = %e, "Failed to persist session; it will not survive a restart");
        }
    }

    async fn remove_persisted(&self) {
        if let Err(e) = self.inner.storage.remove(&self.inner.storage_key).await {
            error!(error = %e, "Failed to remove persisted session");
        }
    }

    /// Sign-in route used by guards and logout.
    pub fn sign_in_route(&self) -> &str {
        &self.inner.routes.sign_in_route
    }
}

/// Human-readable reason for a failed login step.
pub fn login_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Transport(_) => UNREACHABLE_MESSAGE.to_string(),
        other => other
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use infradesk_core::types::UserId;
    use infradesk_entity::{Profile, UserRole, UserStatus};

    use super::*;
    use crate::session::MemoryStorage;

    #[derive(Debug, Default)]
    struct RecordingNavigator(Mutex<Vec<String>>);

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: &str) {
            self.0.lock().unwrap().push(route.to_string());
        }
    }

    fn session() -> Session {
        let profile = Profile {
            id: UserId(1),
            first_name: "Alice".to_string(),
            last_name: "Ng".to_string(),
            email: "alice@example.com".to_string(),
            role: UserRole::Admin,
            status: UserStatus::Active,
        };
        Session::from_login("alice", "tok-123", profile).unwrap()
    }

    fn store(storage: MemoryStorage, navigator: Arc<RecordingNavigator>) -> SessionStore {
        SessionStore::new(
            Arc::new(storage),
            navigator,
            &SessionConfig::default(),
            NavigationConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_hydrate_without_record() {
        let store = store(MemoryStorage::new(), Arc::default());
        assert!(!store.is_hydrated());
        assert_eq!(store.hydrate().await, None);
        assert!(store.is_hydrated());
        assert_eq!(store.status().await, AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_hydrate_restores_session() {
        let storage = MemoryStorage::new();
        let record = PersistedAuth {
            user: Some(session()),
        };
        storage
            .set("auth-storage", &serde_json::to_string(&record).unwrap())
            .await
            .unwrap();

        let store = store(storage, Arc::default());
        assert_eq!(store.hydrate().await, Some(session()));
        assert_eq!(store.status().await, AuthStatus::Authenticated);
        assert_eq!(store.token().await.as_deref(), Some("tok-123"));
    }

    #[derive(Debug, Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        reads: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl KeyValueStore for CountingStorage {
        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            self.reads.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> AppResult<()> {
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> AppResult<()> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_hydrate_reads_once() {
        let storage = Arc::new(CountingStorage::default());
        let record = PersistedAuth {
            user: Some(session()),
        };
        storage
            .set("auth-storage", &serde_json::to_string(&record).unwrap())
            .await
            .unwrap();
        let store = SessionStore::new(
            storage.clone(),
            Arc::new(RecordingNavigator::default()),
            &SessionConfig::default(),
            NavigationConfig::default(),
        );

        let (first, second) = tokio::join!(store.hydrate(), store.hydrate());

        assert_eq!(first, Some(session()));
        assert_eq!(second, Some(session()));
        assert_eq!(storage.reads.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hydrate_discards_corrupt_record() {
        let storage = MemoryStorage::new();
        storage.set("auth-storage", "{not json").await.unwrap();

        let store = store(storage.clone(), Arc::default());
        assert_eq!(store.hydrate().await, None);
        assert!(store.is_hydrated());
        assert!(!storage.contains("auth-storage"));
    }

    #[tokio::test]
    async fn test_expire_clears_everything_and_navigates() {
        let storage = MemoryStorage::new();
        let record = PersistedAuth {
            user: Some(session()),
        };
        storage
            .set("auth-storage", &serde_json::to_string(&record).unwrap())
            .await
            .unwrap();
        let navigator = Arc::new(RecordingNavigator::default());
        let store = store(storage.clone(), navigator.clone());
        store.hydrate().await;

        store.expire(403).await;

        assert_eq!(store.current_session().await, None);
        assert_eq!(store.status().await, AuthStatus::Unauthenticated);
        assert!(!storage.contains("auth-storage"));
        assert_eq!(*navigator.0.lock().unwrap(), vec!["/signin".to_string()]);
    }

    #[test]
    fn test_login_failure_messages() {
        let with_message = ApiError::Status {
            status: 400,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(login_failure_message(&with_message), "Invalid credentials");

        let bare = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(login_failure_message(&bare), LOGIN_FAILED_MESSAGE);

        let offline = ApiError::Transport("connection refused".to_string());
        assert_eq!(login_failure_message(&offline), UNREACHABLE_MESSAGE);
    }
}
