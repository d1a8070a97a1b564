//! Disk array management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use infradesk_core::error::AppError;
use infradesk_core::types::{DatacenterId, DiskArrayId};
use infradesk_entity::{AssetStatus, DiskArray, DiskArrayDraft};
use infradesk_service::Console;

use super::resource;
use crate::output::{self, OutputFormat};

/// Arguments for disk array commands
#[derive(Debug, Args)]
pub struct DiskArgs {
    /// Disk array subcommand
    #[command(subcommand)]
    pub command: DiskCommand,
}

/// Editable fields; unset flags leave the field as it is
#[derive(Debug, Clone, Args)]
pub struct DiskFields {
    #[arg(long)]
    pub serial_number: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub manufacturer: Option<String>,
    /// in_use, maintenance, or available
    #[arg(long)]
    pub status: Option<AssetStatus>,
    /// Capacity in GB
    #[arg(long)]
    pub storage: Option<i64>,
    /// Owning datacenter ID
    #[arg(long)]
    pub datacenter: Option<DatacenterId>,
}

impl DiskFields {
    fn apply(&self, draft: &mut DiskArrayDraft) {
        resource::overwrite(&mut draft.serial_number, &self.serial_number);
        resource::overwrite(&mut draft.model, &self.model);
        resource::overwrite(&mut draft.manufacturer, &self.manufacturer);
        resource::overwrite(&mut draft.status, &self.status);
        resource::overwrite(&mut draft.storage, &self.storage);
        resource::overwrite(&mut draft.datacenter, &self.datacenter);
    }
}

/// Disk array subcommands
#[derive(Debug, Subcommand)]
pub enum DiskCommand {
    /// List all disk arrays
    List,
    /// Add a disk array
    Create(DiskFields),
    /// Change a disk array
    Edit {
        /// Disk array ID
        id: DiskArrayId,
        #[command(flatten)]
        fields: DiskFields,
    },
    /// Delete a disk array
    Delete {
        /// Disk array ID
        id: DiskArrayId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Disk array display row for table output
#[derive(Debug, Serialize, Tabled)]
struct DiskRow {
    id: i64,
    serial_number: String,
    model: String,
    manufacturer: String,
    status: String,
    storage: i64,
    datacenter: i64,
}

impl From<&DiskArray> for DiskRow {
    fn from(d: &DiskArray) -> Self {
        Self {
            id: d.id.get(),
            serial_number: d.serial_number.clone(),
            model: d.model.clone(),
            manufacturer: d.manufacturer.clone(),
            status: d.status.label().to_string(),
            storage: d.storage,
            datacenter: d.datacenter.get(),
        }
    }
}

/// Execute disk array commands
pub async fn execute(args: &DiskArgs, console: &Console, format: OutputFormat) -> Result<(), AppError> {
    resource::require_session(console).await?;
    let sync = console.sync::<DiskArray>();

    match &args.command {
        DiskCommand::List => {
            let rows: Vec<DiskRow> = sync.refresh().await?.iter().map(Into::into).collect();
            output::print_list(&rows, format);
        }
        DiskCommand::Create(fields) => {
            let mut session = sync.begin_create();
            fields.apply(session.draft_mut());
            resource::report(sync.submit(session).await)?;
        }
        DiskCommand::Edit { id, fields } => {
            let record = resource::find(&sync, *id).await?;
            let mut session = sync.begin_edit(&record);
            fields.apply(session.draft_mut());
            resource::report(sync.submit(session).await)?;
        }
        DiskCommand::Delete { id, yes } => {
            resource::delete(&sync, *id, *yes).await?;
        }
    }

    Ok(())
}
