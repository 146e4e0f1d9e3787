use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "equipment-dashboard")]
#[command(about = "Client for the chemical equipment parameter dashboard API")]
pub struct Cli {
    /// Config file (defaults to config/client.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Log out (the local session is cleared even if the server is unreachable)
    Logout,
    /// Show who is logged in
    Status,
    /// Refresh and print the dashboard
    Dashboard,
    /// Upload a CSV dataset, then print the refreshed dashboard
    Upload { path: PathBuf },
    /// Download the latest PDF report
    Report,
}
