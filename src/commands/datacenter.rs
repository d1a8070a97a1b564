//! Datacenter management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use infradesk_core::error::AppError;
use infradesk_core::types::DatacenterId;
use infradesk_entity::{Datacenter, DatacenterDraft};
use infradesk_service::Console;

use super::resource;
use crate::output::{self, OutputFormat};

/// Arguments for datacenter commands
#[derive(Debug, Args)]
pub struct DatacenterArgs {
    /// Datacenter subcommand
    #[command(subcommand)]
    pub command: DatacenterCommand,
}

/// Editable fields; unset flags leave the field as it is
#[derive(Debug, Clone, Args)]
pub struct DatacenterFields {
    /// Name
    #[arg(long)]
    pub name: Option<String>,
    /// Physical location
    #[arg(long)]
    pub location: Option<String>,
}

impl DatacenterFields {
    fn apply(&self, draft: &mut DatacenterDraft) {
        resource::overwrite(&mut draft.name, &self.name);
        resource::overwrite(&mut draft.location, &self.location);
    }
}

/// Datacenter subcommands
#[derive(Debug, Subcommand)]
pub enum DatacenterCommand {
    /// List all datacenters
    List,
    /// Add a datacenter
    Create(DatacenterFields),
    /// Change a datacenter
    Edit {
        /// Datacenter ID
        id: DatacenterId,
        #[command(flatten)]
        fields: DatacenterFields,
    },
    /// Delete a datacenter
    Delete {
        /// Datacenter ID
        id: DatacenterId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Datacenter display row for table output
#[derive(Debug, Serialize, Tabled)]
struct DatacenterRow {
    id: i64,
    name: String,
    location: String,
}

impl From<&Datacenter> for DatacenterRow {
    fn from(dc: &Datacenter) -> Self {
        Self {
            id: dc.id.get(),
            name: dc.name.clone(),
            location: dc.location.clone(),
        }
    }
}

/// Execute datacenter commands
pub async fn execute(
    args: &DatacenterArgs,
    console: &Console,
    format: OutputFormat,
) -> Result<(), AppError> {
    resource::require_session(console).await?;
    let sync = console.sync::<Datacenter>();

    match &args.command {
        DatacenterCommand::List => {
            let rows: Vec<DatacenterRow> = sync.refresh().await?.iter().map(Into::into).collect();
            output::print_list(&rows, format);
        }
        DatacenterCommand::Create(fields) => {
            let mut session = sync.begin_create();
            fields.apply(session.draft_mut());
            resource::report(sync.submit(session).await)?;
        }
        DatacenterCommand::Edit { id, fields } => {
            let record = resource::find(&sync, *id).await?;
            let mut session = sync.begin_edit(&record);
            fields.apply(session.draft_mut());
            resource::report(sync.submit(session).await)?;
        }
        DatacenterCommand::Delete { id, yes } => {
            resource::delete(&sync, *id, *yes).await?;
        }
    }

    Ok(())
}
