//! Console command definitions and dispatch.

pub mod auth;
pub mod datacenter;
pub mod deploy;
pub mod deployments;
pub mod disk;
pub mod maintenance;
pub mod resource;
pub mod server;
pub mod user;

use clap::{Parser, Subcommand};

use infradesk_core::error::AppError;
use infradesk_service::Console;

use crate::output::OutputFormat;

/// InfraDesk - datacenter inventory and VM deployment console
#[derive(Debug, Parser)]
#[command(name = "infradesk", version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in
    Login(auth::LoginArgs),
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Request a password reset email
    ForgotPassword(auth::ForgotPasswordArgs),
    /// Set a new password with a reset token
    ResetPassword(auth::ResetPasswordArgs),
    /// Datacenter management
    Datacenter(datacenter::DatacenterArgs),
    /// Server management
    Server(server::ServerArgs),
    /// Disk array management
    Disk(disk::DiskArgs),
    /// User management (admin only)
    User(user::UserArgs),
    /// Maintenance records of a datacenter
    Maintenance(maintenance::MaintenanceArgs),
    /// Deploy VMs through the deployment wizard
    Deploy(deploy::DeployArgs),
    /// Submitted deployment jobs
    Deployments(deployments::DeploymentsArgs),
}

impl Cli {
    /// Execute the command against a bootstrapped console
    pub async fn execute(&self, console: &Console) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => auth::login(args, console).await,
            Commands::Logout => auth::logout(console).await,
            Commands::Whoami => auth::whoami(console, self.format).await,
            Commands::ForgotPassword(args) => auth::forgot_password(args, console).await,
            Commands::ResetPassword(args) => auth::reset_password(args, console).await,
            Commands::Datacenter(args) => datacenter::execute(args, console, self.format).await,
            Commands::Server(args) => server::execute(args, console, self.format).await,
            Commands::Disk(args) => disk::execute(args, console, self.format).await,
            Commands::User(args) => user::execute(args, console, self.format).await,
            Commands::Maintenance(args) => maintenance::execute(args, console, self.format).await,
            Commands::Deploy(args) => deploy::execute(args, console, self.format).await,
            Commands::Deployments(args) => deployments::execute(args, console, self.format).await,
        }
    }
}
