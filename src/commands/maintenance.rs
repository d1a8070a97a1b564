//! Maintenance record commands, scoped to one datacenter.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use infradesk_core::error::AppError;
use infradesk_core::types::{DatacenterId, MaintenanceRecordId};
use infradesk_entity::{MaintenanceRecord, MaintenanceRecordDraft};
use infradesk_service::Console;

use super::resource;
use crate::output::{self, OutputFormat};

/// Arguments for maintenance commands
#[derive(Debug, Args)]
pub struct MaintenanceArgs {
    /// Datacenter the records belong to
    #[arg(short, long, global = true)]
    pub datacenter: Option<DatacenterId>,

    /// Maintenance subcommand
    #[command(subcommand)]
    pub command: MaintenanceCommand,
}

/// Editable fields; unset flags leave the field as it is
#[derive(Debug, Clone, Args)]
pub struct MaintenanceFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// RFC 3339 timestamp, e.g. 2024-03-01T09:30:00Z
    #[arg(long)]
    pub performed_at: Option<DateTime<Utc>>,
    /// Target resource ID, as listed by `maintenance targets`
    #[arg(long)]
    pub resource: Option<i64>,
}

/// Maintenance subcommands
#[derive(Debug, Subcommand)]
pub enum MaintenanceCommand {
    /// List the datacenter's maintenance records
    List,
    /// List resources a record can target
    Targets,
    /// Record maintenance
    Create(MaintenanceFields),
    /// Change a record
    Edit {
        /// Record ID
        id: MaintenanceRecordId,
        #[command(flatten)]
        fields: MaintenanceFields,
    },
    /// Delete a record
    Delete {
        /// Record ID
        id: MaintenanceRecordId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Maintenance record display row for table output
#[derive(Debug, Serialize, Tabled)]
struct MaintenanceRow {
    id: i64,
    title: String,
    description: String,
    performed_at: String,
    resource: String,
}

impl From<&MaintenanceRecord> for MaintenanceRow {
    fn from(r: &MaintenanceRecord) -> Self {
        Self {
            id: r.id.get(),
            title: r.title.clone(),
            description: r.description.clone(),
            performed_at: r.performed_at.format("%Y-%m-%d %H:%M").to_string(),
            resource: r.resource_repr.clone(),
        }
    }
}

/// Target display row for table output
#[derive(Debug, Serialize, Tabled)]
struct TargetRow {
    id: i64,
    name: String,
    #[tabled(rename = "type")]
    kind: String,
}

/// Execute maintenance commands
pub async fn execute(
    args: &MaintenanceArgs,
    console: &Console,
    format: OutputFormat,
) -> Result<(), AppError> {
    resource::require_session(console).await?;
    let datacenter = args
        .datacenter
        .ok_or_else(|| AppError::validation("--datacenter is required"))?;
    let sync = console.maintenance(datacenter);

    match &args.command {
        MaintenanceCommand::List => {
            let rows: Vec<MaintenanceRow> = sync.refresh().await?.iter().map(Into::into).collect();
            output::print_list(&rows, format);
        }
        MaintenanceCommand::Targets => {
            let rows: Vec<TargetRow> = sync
                .targets()
                .await?
                .into_iter()
                .map(|t| TargetRow {
                    id: t.id,
                    name: t.name,
                    kind: t.kind,
                })
                .collect();
            output::print_list(&rows, format);
        }
        MaintenanceCommand::Create(fields) => {
            let mut session = sync.begin_record();
            apply(&sync, fields, session.draft_mut()).await?;
            resource::report(sync.submit(session).await)?;
        }
        MaintenanceCommand::Edit { id, fields } => {
            let record = resource::find(&sync, *id).await?;
            let mut session = sync.begin_edit(&record);
            apply(&sync, fields, session.draft_mut()).await?;
            resource::report(sync.submit(session).await)?;
        }
        MaintenanceCommand::Delete { id, yes } => {
            resource::delete(&sync, *id, *yes).await?;
        }
    }

    Ok(())
}

/// Copy flags into the draft, resolving `--resource` against the
/// datacenter's targets.
async fn apply(
    sync: &infradesk_service::EntitySync<MaintenanceRecord>,
    fields: &MaintenanceFields,
    draft: &mut MaintenanceRecordDraft,
) -> Result<(), AppError> {
    resource::overwrite(&mut draft.title, &fields.title);
    resource::overwrite(&mut draft.description, &fields.description);
    resource::overwrite(&mut draft.performed_at, &fields.performed_at);

    if let Some(id) = fields.resource {
        let target = sync
            .targets()
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::not_found(format!("Resource {id} is not in this datacenter")))?;
        draft.target(&target);
    }
    Ok(())
}
