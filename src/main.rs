use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::process::ExitCode;

use fabric_workspaces::cli::commands::{create_command, delete_command};
use fabric_workspaces::cli::{Cli, Commands};
use fabric_workspaces::config;

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Loaded before the logger so RUST_LOG can come from the file
    let env_file = config::load_env_file(cli.env_file.as_deref());

    if let Err(err) = init_logging(cli.log_file.as_deref()) {
        eprintln!("{:#}", err);
        return ExitCode::FAILURE;
    }
    if let Err(err) = env_file {
        error!("{}", err);
        return ExitCode::FAILURE;
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    info!("Starting fabric-workspaces {}", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Create => create_command(cli.report.as_deref()).await,
        Commands::Delete => delete_command(cli.report.as_deref()).await,
    };

    match result {
        Ok(outcome) => outcome.exit_code(cli.strict),
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
