// CLI command handlers
use crate::application::errors::ClientError;
use crate::domain::credential::AuthState;
use crate::domain::dataset::UploadFile;
use crate::presentation::app_state::AppState;
use crate::presentation::cli::Command;
use crate::presentation::render::{render_dashboard, render_user};
use anyhow::Context;
use std::path::Path;

pub async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => login(state, &username, &password).await,
        Command::Logout => {
            state.logout().await;
            println!("Logged out");
            Ok(())
        }
        Command::Status => {
            match state.auth.state() {
                AuthState::Authenticated(credential) => {
                    println!("{}", render_user(Some(&credential.username)))
                }
                AuthState::Anonymous => println!("Logged out"),
            }
            Ok(())
        }
        Command::Dashboard => dashboard(state).await,
        Command::Upload { path } => upload(state, &path).await,
        Command::Report => report(state).await,
    }
}

async fn login(state: &AppState, username: &str, password: &str) -> anyhow::Result<()> {
    let credential = state.auth.login(username, password).await?;
    println!("{}", render_user(Some(&credential.username)));
    Ok(())
}

async fn dashboard(state: &AppState) -> anyhow::Result<()> {
    require_login(state)?;

    // Whatever did load is shown before the failure is reported.
    let refreshed = state.dashboard.refresh().await;
    print_dashboard(state);
    refreshed?;
    Ok(())
}

async fn upload(state: &AppState, path: &Path) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.csv".to_string());

    let receipt = state
        .dashboard
        .upload_then_refresh(Some(UploadFile::csv(filename, bytes)))
        .await?;

    println!("Uploaded {} as dataset {}", receipt.filename, receipt.dataset_id);
    print_dashboard(state);
    Ok(())
}

async fn report(state: &AppState) -> anyhow::Result<()> {
    let path = state.reports.download_latest_report().await?;
    println!("Report saved to {}", path.display());
    Ok(())
}

fn require_login(state: &AppState) -> Result<(), ClientError> {
    if state.auth.is_authenticated() {
        Ok(())
    } else {
        Err(ClientError::login_required())
    }
}

fn print_dashboard(state: &AppState) {
    let view = state.dashboard.snapshot();
    println!("{}", render_dashboard(state.auth.username().as_deref(), &view));
}
