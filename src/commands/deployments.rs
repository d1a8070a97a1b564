//! Submitted deployment jobs and their logs.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use infradesk_core::error::AppError;
use infradesk_core::types::DeploymentJobId;
use infradesk_entity::DeploymentJob;
use infradesk_service::Console;

use super::resource;
use crate::output::{self, OutputFormat};

/// Arguments for deployment job commands
#[derive(Debug, Args)]
pub struct DeploymentsArgs {
    /// Deployment job subcommand
    #[command(subcommand)]
    pub command: DeploymentsCommand,
}

/// Deployment job subcommands
#[derive(Debug, Subcommand)]
pub enum DeploymentsCommand {
    /// List submitted jobs
    List,
    /// Show a job's logs
    Logs {
        /// Job ID
        id: DeploymentJobId,
    },
}

/// Deployment job display row for table output
#[derive(Debug, Serialize, Tabled)]
struct DeploymentRow {
    id: i64,
    name: String,
    vm_name: String,
    vm_count: i64,
    cpu: i64,
    memory: i64,
    status: String,
    created_at: String,
}

impl From<&DeploymentJob> for DeploymentRow {
    fn from(j: &DeploymentJob) -> Self {
        Self {
            id: j.id.get(),
            name: j.name.clone(),
            vm_name: j.vm_name.clone(),
            vm_count: j.vm_count,
            cpu: j.cpu,
            memory: j.memory,
            status: j.status.clone().unwrap_or_else(|| "-".to_string()),
            created_at: j
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute deployment job commands
pub async fn execute(
    args: &DeploymentsArgs,
    console: &Console,
    format: OutputFormat,
) -> Result<(), AppError> {
    resource::require_session(console).await?;
    let service = console.deployments();

    match &args.command {
        DeploymentsCommand::List => {
            let rows: Vec<DeploymentRow> = service.jobs().await?.iter().map(Into::into).collect();
            output::print_list(&rows, format);
        }
        DeploymentsCommand::Logs { id } => {
            let logs = service.logs(*id).await?;
            match format {
                OutputFormat::Table => println!("{}", logs.text()),
                OutputFormat::Json => output::print_fields(&[("logs", logs.text().to_string())], format),
            }
        }
    }

    Ok(())
}
