//! `create` command handler

use anyhow::Result;
use log::error;
use std::path::Path;

use super::{RunOutcome, connect};
use crate::cli::output;
use crate::config::{self, CreateSettings};
use crate::workspaces;

pub async fn create_command(report_path: Option<&Path>) -> Result<RunOutcome> {
    let (settings, create) = CreateSettings::load(&config::env_lookup)?;
    let client = connect(&settings).await?;

    match workspaces::create_workspaces(&client, &create).await {
        Ok(report) => {
            output::print_create_summary(&report);
            if let Some(path) = report_path {
                output::write_create_report(path, &report)?;
            }
            Ok(RunOutcome::Completed {
                has_failures: report.has_failures(),
            })
        }
        Err(err) => {
            error!("{}", err);
            output::print_aborted(&err);
            Ok(RunOutcome::Aborted)
        }
    }
}
