//! List, edit, and delete one backend collection.

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use infradesk_auth::SessionStore;
use infradesk_client::{ApiClient, RequestTracker, ResourceApi};
use infradesk_core::error::AppError;
use infradesk_core::result::AppResult;
use infradesk_core::traits::Confirmation;
use infradesk_core::types::{DatacenterId, Notification};
use infradesk_entity::{MaintenanceRecord, MaintenanceResource, Resource, validation};

use super::edit::EditSession;
use super::outcome::SyncOutcome;
use super::patch::Patch;

const UPDATE_FAILED: &str = "Failed to update. Please try again.";
const DELETE_FAILED: &str = "Failed to delete. Please try again.";

/// The authoritative list for one kind and the edit operations on it.
///
/// The list is only ever replaced by a re-fetch from the backend, never
/// patched locally.
#[derive(Debug)]
pub struct EntitySync<R: Resource> {
    client: ApiClient,
    store: SessionStore,
    /// Path the list is fetched from.
    list_path: String,
    /// Datacenter this view is limited to, if any.
    scope: Option<DatacenterId>,
    /// Fields stamped into every create payload.
    create_fields: Patch,
    items: RwLock<Vec<R>>,
    tracker: RequestTracker,
}

impl<R: Resource> EntitySync<R> {
    /// Sync handle for the whole `/{collection}/`.
    pub fn new(client: ApiClient, store: SessionStore) -> Self {
        Self {
            client,
            store,
            list_path: ResourceApi::<R>::collection_path(),
            scope: None,
            create_fields: Patch::new(),
            items: RwLock::new(Vec::new()),
            tracker: RequestTracker::new(),
        }
    }

    /// The last fetched list.
    pub async fn items(&self) -> Vec<R> {
        self.items.read().await.clone()
    }

    pub async fn find(&self, id: R::Id) -> Option<R> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    async fn token(&self) -> AppResult<String> {
        self.store
            .token()
            .await
            .ok_or_else(|| AppError::authentication("Please sign in first."))
    }

    /// Re-fetch the list. A response overtaken by a newer refresh is
    /// dropped and the newer list is kept.
    pub async fn refresh(&self) -> AppResult<Vec<R>> {
        let token = self.token().await?;
        let ticket = self.tracker.begin();

        let list = self
            .client
            .resource::<R>(Some(&token))
            .list_at(&self.list_path)
            .await
            .into_result()?;

        let mut items = self.items.write().await;
        if self.tracker.is_current(ticket) {
            debug!(kind = R::KIND, count = list.len(), "List refreshed");
            *items = list;
        }
        Ok(items.clone())
    }

    async fn refresh_after(&self, action: &str) {
        if let Err(e) = self.refresh().await {
            warn!(kind = R::KIND, action, error = %e, "Re-fetch after change failed");
        }
    }

    /// Open an editor for a new record.
    pub fn begin_create(&self) -> EditSession<R> {
        EditSession::create()
    }

    /// Open an editor pre-filled from `record`.
    pub fn begin_edit(&self, record: &R) -> EditSession<R> {
        EditSession::edit(record)
    }

    /// Send the editor's changes.
    ///
    /// Creates are validated and post the full draft. Edits patch only
    /// the changed fields, and an empty patch sends nothing. On success the
    /// list is re-fetched before returning.
    pub async fn submit(&self, session: EditSession<R>) -> SyncOutcome<R> {
        match session.original().map(|record| record.id()) {
            Some(id) => self.submit_update(id, session).await,
            None => self.submit_create(session).await,
        }
    }

    async fn submit_create(&self, session: EditSession<R>) -> SyncOutcome<R> {
        let fail = |error: AppError| Notification::error("Creation Failed", error.message.clone());

        if let Err(e) = validation::check(session.draft()) {
            return rejected(Some(session), fail(e.clone()), e);
        }
        let mut payload = match session.changes() {
            Ok(payload) => payload,
            Err(e) => return rejected(Some(session), fail(e.clone()), e),
        };
        for (key, value) in &self.create_fields {
            payload.insert(key.clone(), value.clone());
        }
        let token = match self.token().await {
            Ok(token) => token,
            Err(e) => return rejected(Some(session), fail(e.clone()), e),
        };

        let outcome = self
            .client
            .resource::<R>(Some(&token))
            .create(&payload)
            .await;
        match outcome.into_result() {
            Ok(record) => {
                info!(kind = R::KIND, id = %record.id(), "Created");
                self.refresh_after("create").await;
                let notification = Notification::success(
                    format!("{} Created", R::KIND),
                    format!("{} has been successfully added.", record.subject()),
                );
                SyncOutcome::Saved {
                    record,
                    notification,
                }
            }
            Err(e) => rejected(Some(session), fail(e.clone()), e),
        }
    }

    /// Fields left unset in the draft are not part of the patch, so the
    /// create-time rules do not apply here.
    async fn submit_update(&self, id: R::Id, session: EditSession<R>) -> SyncOutcome<R> {
        let fail = || Notification::error("Error", UPDATE_FAILED);

        let patch = match session.changes() {
            Ok(patch) => patch,
            Err(e) => return rejected(Some(session), fail(), e),
        };
        if patch.is_empty() {
            debug!(kind = R::KIND, %id, "Nothing changed; skipping request");
            return SyncOutcome::Unchanged;
        }
        let token = match self.token().await {
            Ok(token) => token,
            Err(e) => return rejected(Some(session), fail(), e),
        };

        let fields: Vec<&str> = patch.keys().map(String::as_str).collect();
        debug!(kind = R::KIND, %id, ?fields, "Sending patch");

        let outcome = self
            .client
            .resource::<R>(Some(&token))
            .update(id, &patch)
            .await;
        match outcome.into_result() {
            Ok(record) => {
                info!(kind = R::KIND, %id, "Updated");
                self.refresh_after("update").await;
                let notification = Notification::success(
                    format!("{} Updated", R::KIND),
                    format!("{} was successfully updated.", record.subject()),
                );
                SyncOutcome::Saved {
                    record,
                    notification,
                }
            }
            Err(e) => rejected(Some(session), fail(), e),
        }
    }

    /// Delete `record` after an explicit yes from `confirmation`.
    pub async fn delete(&self, record: &R, confirmation: &dyn Confirmation) -> SyncOutcome<R> {
        let fail = || Notification::error("Error", DELETE_FAILED);
        let id = record.id();

        let prompt = format!("Delete {} {}?", R::KIND.to_lowercase(), record.subject());
        match confirmation.confirm(&prompt) {
            Ok(true) => {}
            Ok(false) => {
                info!(kind = R::KIND, %id, "Delete cancelled");
                return SyncOutcome::Cancelled;
            }
            Err(e) => return rejected(None, fail(), e),
        }

        let token = match self.token().await {
            Ok(token) => token,
            Err(e) => return rejected(None, fail(), e),
        };

        let outcome = self.client.resource::<R>(Some(&token)).delete(id).await;
        match outcome.into_result() {
            Ok(()) => {
                info!(kind = R::KIND, %id, "Deleted");
                self.refresh_after("delete").await;
                SyncOutcome::Deleted {
                    notification: Notification::success(
                        format!("{} Deleted", R::KIND),
                        format!("{} was successfully deleted.", record.subject()),
                    ),
                }
            }
            Err(e) => rejected(None, fail(), e),
        }
    }
}

fn rejected<R: Resource>(
    session: Option<EditSession<R>>,
    notification: Notification,
    error: AppError,
) -> SyncOutcome<R> {
    warn!(kind = R::KIND, error = %error, "Change rejected");
    SyncOutcome::Rejected {
        session,
        error,
        notification,
    }
}

impl EntitySync<MaintenanceRecord> {
    /// Maintenance records of one datacenter. New records are stamped
    /// with that datacenter.
    pub fn for_datacenter(client: ApiClient, store: SessionStore, datacenter: DatacenterId) -> Self {
        let mut sync = Self::new(client, store);
        sync.list_path = infradesk_client::maintenance::records_path(datacenter);
        sync.scope = Some(datacenter);
        sync.create_fields.insert("datacenter".to_string(), Value::from(datacenter.get()));
        sync
    }

    /// Open a create editor already pointing at the scoped datacenter.
    pub fn begin_record(&self) -> EditSession<MaintenanceRecord> {
        let mut session = EditSession::<MaintenanceRecord>::create();
        session.draft_mut().datacenter = self.scope;
        session
    }

    /// Resources in the scoped datacenter a record can target.
    pub async fn targets(&self) -> AppResult<Vec<MaintenanceResource>> {
        let datacenter = self
            .scope
            .ok_or_else(|| AppError::validation("A datacenter must be selected"))?;
        let token = self.token().await?;
        self.client
            .datacenter_resources(&token, datacenter)
            .await
            .into_result()
    }
}
