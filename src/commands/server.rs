//! Server management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use infradesk_core::error::AppError;
use infradesk_core::types::{DatacenterId, ServerId};
use infradesk_entity::{AssetStatus, Server, ServerDraft};
use infradesk_service::Console;

use super::resource;
use crate::output::{self, OutputFormat};

/// Arguments for server commands
#[derive(Debug, Args)]
pub struct ServerArgs {
    /// Server subcommand
    #[command(subcommand)]
    pub command: ServerCommand,
}

/// Editable fields; unset flags leave the field as it is
#[derive(Debug, Clone, Args)]
pub struct ServerFields {
    #[arg(long)]
    pub serial_number: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub manufacturer: Option<String>,
    /// in_use, maintenance, or available
    #[arg(long)]
    pub status: Option<AssetStatus>,
    /// CPU cores
    #[arg(long)]
    pub cpu: Option<i64>,
    /// RAM in GB
    #[arg(long)]
    pub ram: Option<i64>,
    /// Storage in GB
    #[arg(long)]
    pub storage: Option<i64>,
    #[arg(long)]
    pub ip_address: Option<String>,
    /// Owning datacenter ID
    #[arg(long)]
    pub datacenter: Option<DatacenterId>,
}

impl ServerFields {
    fn apply(&self, draft: &mut ServerDraft) {
        resource::overwrite(&mut draft.serial_number, &self.serial_number);
        resource::overwrite(&mut draft.model, &self.model);
        resource::overwrite(&mut draft.manufacturer, &self.manufacturer);
        resource::overwrite(&mut draft.status, &self.status);
        resource::overwrite(&mut draft.cpu, &self.cpu);
        resource::overwrite(&mut draft.ram, &self.ram);
        resource::overwrite(&mut draft.storage, &self.storage);
        resource::overwrite(&mut draft.ip_address, &self.ip_address);
        resource::overwrite(&mut draft.datacenter, &self.datacenter);
    }
}

/// Server subcommands
#[derive(Debug, Subcommand)]
pub enum ServerCommand {
    /// List all servers
    List,
    /// Add a server
    Create(ServerFields),
    /// Change a server
    Edit {
        /// Server ID
        id: ServerId,
        #[command(flatten)]
        fields: ServerFields,
    },
    /// Delete a server
    Delete {
        /// Server ID
        id: ServerId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Server display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ServerRow {
    id: i64,
    serial_number: String,
    model: String,
    manufacturer: String,
    status: String,
    cpu: i64,
    ram: i64,
    storage: i64,
    ip_address: String,
    datacenter: i64,
}

impl From<&Server> for ServerRow {
    fn from(s: &Server) -> Self {
        Self {
            id: s.id.get(),
            serial_number: s.serial_number.clone(),
            model: s.model.clone(),
            manufacturer: s.manufacturer.clone(),
            status: s.status.label().to_string(),
            cpu: s.cpu,
            ram: s.ram,
            storage: s.storage,
            ip_address: s.ip_address.clone(),
            datacenter: s.datacenter.get(),
        }
    }
}

/// Execute server commands
pub async fn execute(args: &ServerArgs, console: &Console, format: OutputFormat) -> Result<(), AppError> {
    resource::require_session(console).await?;
    let sync = console.sync::<Server>();

    match &args.command {
        ServerCommand::List => {
            let rows: Vec<ServerRow> = sync.refresh().await?.iter().map(Into::into).collect();
            output::print_list(&rows, format);
        }
        ServerCommand::Create(fields) => {
            let mut session = sync.begin_create();
            fields.apply(session.draft_mut());
            resource::report(sync.submit(session).await)?;
        }
        ServerCommand::Edit { id, fields } => {
            let record = resource::find(&sync, *id).await?;
            let mut session = sync.begin_edit(&record);
            fields.apply(session.draft_mut());
            resource::report(sync.submit(session).await)?;
        }
        ServerCommand::Delete { id, yes } => {
            resource::delete(&sync, *id, *yes).await?;
        }
    }

    Ok(())
}
