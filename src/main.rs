// Main entry point - Dependency injection and command dispatch
mod domain;
mod application;
mod infrastructure;
mod presentation;

use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::token_store::TokenStore;
use crate::infrastructure::config::load_client_config;
use crate::infrastructure::reqwest_transport::ReqwestTransport;
use crate::infrastructure::report_sink::FileReportSink;
use crate::infrastructure::token_store::{FileTokenStore, MemoryTokenStore};
use crate::presentation::app_state::AppState;
use crate::presentation::cli::Cli;
use crate::presentation::handlers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = load_client_config(cli.config.as_deref())?;
    tracing::debug!("Using API at {}", config.api.base_url);

    // Session storage
    let token_store: Arc<dyn TokenStore> = match config.storage.token_file() {
        Some(path) => Arc::new(FileTokenStore::new(path)),
        None => Arc::new(MemoryTokenStore::default()),
    };

    // Controllers (auth bootstraps from the token store here)
    let state = AppState::new(
        &config.api.base_url,
        Arc::new(ReqwestTransport::new()),
        token_store,
        FileReportSink::new(&config.reports.download_dir),
    );

    handlers::run(&state, cli.command).await
}
