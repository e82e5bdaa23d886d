use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fabric-workspaces")]
#[command(about = "Create and delete Power BI / Microsoft Fabric workspaces", version)]
pub struct Cli {
    /// Load environment variables from this file instead of ./.env
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Write logs to this file (truncated each run) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Save the per-workspace run report as JSON
    #[arg(long, global = true, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Exit with status 2 when any workspace operation failed or nothing was done
    #[arg(long, global = true)]
    pub strict: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create DEV/UAT/PRD workspaces for WORKSPACE_NAMES and assign ADMIN_EMAILS
    Create,
    /// Delete the workspaces named in WORKSPACES_TO_DELETE
    Delete,
}
