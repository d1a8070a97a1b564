//! Sign-in, sign-out, and password recovery commands.

use clap::Args;

use infradesk_core::error::AppError;
use infradesk_entity::Credentials;
use infradesk_service::Console;

use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Login name (will prompt if not provided)
    #[arg(short, long)]
    pub username: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for `forgot-password`
#[derive(Debug, Args)]
pub struct ForgotPasswordArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,
}

/// Arguments for `reset-password`
#[derive(Debug, Args)]
pub struct ResetPasswordArgs {
    /// Reset token from the email
    #[arg(short, long)]
    pub token: String,
    /// New password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

pub async fn login(args: &LoginArgs, console: &Console) -> Result<(), AppError> {
    let username = match &args.username {
        Some(u) => u.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let session = console
        .login(&Credentials::new(username, password))
        .await?;

    output::print_success(&format!(
        "Signed in as {} ({})",
        session.display_name(),
        session.role.label()
    ));
    Ok(())
}

pub async fn logout(console: &Console) -> Result<(), AppError> {
    console.logout().await;
    output::print_success("Signed out.");
    Ok(())
}

pub async fn whoami(console: &Console, format: OutputFormat) -> Result<(), AppError> {
    let session = super::resource::require_session(console).await?;

    output::print_fields(
        &[
            ("ID", session.id.to_string()),
            ("Username", session.username.clone()),
            ("Name", session.display_name()),
            ("Email", session.email.clone()),
            ("Role", session.role.label().to_string()),
            ("Status", session.status.label().to_string()),
        ],
        format,
    );
    Ok(())
}

pub async fn forgot_password(args: &ForgotPasswordArgs, console: &Console) -> Result<(), AppError> {
    let ack = console
        .client
        .forgot_password(&args.email)
        .await
        .into_result()?;

    output::print_success(
        ack.message
            .as_deref()
            .unwrap_or("If the account exists, a reset link has been sent."),
    );
    Ok(())
}

pub async fn reset_password(args: &ResetPasswordArgs, console: &Console) -> Result<(), AppError> {
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("New password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let ack = console
        .client
        .reset_password(&args.token, &password)
        .await
        .into_result()?;

    output::print_success(ack.message.as_deref().unwrap_or("Password has been reset."));
    Ok(())
}
