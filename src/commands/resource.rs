//! Helpers shared by the entity commands.

use infradesk_auth::GuardDecision;
use infradesk_core::error::AppError;
use infradesk_core::traits::{Confirmation, Preconfirmed};
use infradesk_entity::{Resource, Session};
use infradesk_service::{Console, EntitySync, SyncOutcome};

use crate::output;
use crate::terminal::DialoguerConfirmation;

/// The current session, or an error telling the user to sign in.
pub async fn require_session(console: &Console) -> Result<Session, AppError> {
    allowed(console.auth_guard().check().await)
}

/// The current session if it belongs to an admin.
pub async fn require_admin(console: &Console) -> Result<Session, AppError> {
    allowed(console.admin_guard().check().await)
}

fn allowed(decision: GuardDecision) -> Result<Session, AppError> {
    match decision {
        GuardDecision::Allowed(session) => Ok(session),
        GuardDecision::Pending => Err(AppError::internal("Session store is not hydrated")),
        GuardDecision::Redirect(_) => Err(AppError::authentication(
            "Not signed in. Run `infradesk login` first.",
        )),
        GuardDecision::Forbidden => Err(AppError::authorization(
            "This command requires an admin account.",
        )),
    }
}

/// Fetch the list and pick the record with `id`.
pub async fn find<R: Resource>(sync: &EntitySync<R>, id: R::Id) -> Result<R, AppError> {
    sync.refresh().await?;
    sync.find(id)
        .await
        .ok_or_else(|| AppError::not_found(format!("{} {id} not found", R::KIND)))
}

/// Print what an edit or delete did; rejections become the command's error.
pub fn report<R: Resource>(outcome: SyncOutcome<R>) -> Result<(), AppError> {
    if let Some(notification) = outcome.notification() {
        output::print_notification(notification);
    }
    match outcome {
        SyncOutcome::Unchanged => {
            println!("No changes.");
            Ok(())
        }
        SyncOutcome::Cancelled => {
            println!("Cancelled.");
            Ok(())
        }
        SyncOutcome::Rejected { error, .. } => Err(error),
        SyncOutcome::Saved { .. } | SyncOutcome::Deleted { .. } => Ok(()),
    }
}

/// Delete by id, prompting unless `yes`.
pub async fn delete<R: Resource>(sync: &EntitySync<R>, id: R::Id, yes: bool) -> Result<(), AppError> {
    let record = find(sync, id).await?;
    let confirmation: &dyn Confirmation = if yes {
        &Preconfirmed(true)
    } else {
        &DialoguerConfirmation
    };
    report(sync.delete(&record, confirmation).await)
}

/// Copy a flag value into a draft field when the flag was given.
pub fn overwrite<T: Clone>(field: &mut Option<T>, flag: &Option<T>) {
    if let Some(value) = flag {
        *field = Some(value.clone());
    }
}
