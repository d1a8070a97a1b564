//! User management commands. Admin only.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use infradesk_core::error::AppError;
use infradesk_core::types::UserId;
use infradesk_entity::{User, UserDraft, UserRole, UserStatus};
use infradesk_service::Console;

use super::resource;
use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// Editable fields; unset flags leave the field as it is
#[derive(Debug, Clone, Args)]
pub struct UserFields {
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    /// operator or admin
    #[arg(long)]
    pub role: Option<UserRole>,
    #[arg(long)]
    pub email: Option<String>,
    /// active or inactive
    #[arg(long)]
    pub status: Option<UserStatus>,
}

impl UserFields {
    fn apply(&self, draft: &mut UserDraft) {
        resource::overwrite(&mut draft.username, &self.username);
        resource::overwrite(&mut draft.first_name, &self.first_name);
        resource::overwrite(&mut draft.last_name, &self.last_name);
        resource::overwrite(&mut draft.role, &self.role);
        resource::overwrite(&mut draft.email, &self.email);
        resource::overwrite(&mut draft.status, &self.status);
    }
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List {
        /// Filter by role
        #[arg(short, long)]
        role: Option<UserRole>,
    },
    /// Add a user
    Create(UserFields),
    /// Change a user
    Edit {
        /// User ID
        id: UserId,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: UserId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: i64,
    username: String,
    name: String,
    email: String,
    role: String,
    status: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.get(),
            username: u.username.clone(),
            name: u.full_name(),
            email: u.email.clone(),
            role: u.role.label().to_string(),
            status: u.status.label().to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, console: &Console, format: OutputFormat) -> Result<(), AppError> {
    resource::require_admin(console).await?;
    let sync = console.sync::<User>();

    match &args.command {
        UserCommand::List { role } => {
            let rows: Vec<UserRow> = sync
                .refresh()
                .await?
                .iter()
                .filter(|u| role.as_ref().is_none_or(|r| u.role == *r))
                .map(Into::into)
                .collect();
            output::print_list(&rows, format);
        }
        UserCommand::Create(fields) => {
            let mut session = sync.begin_create();
            fields.apply(session.draft_mut());
            resource::report(sync.submit(session).await)?;
        }
        UserCommand::Edit { id, fields } => {
            let record = resource::find(&sync, *id).await?;
            let mut session = sync.begin_edit(&record);
            fields.apply(session.draft_mut());
            resource::report(sync.submit(session).await)?;
        }
        UserCommand::Delete { id, yes } => {
            resource::delete(&sync, *id, *yes).await?;
        }
    }

    Ok(())
}
