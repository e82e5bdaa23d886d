//! `delete` command handler

use anyhow::Result;
use log::error;
use std::path::Path;

use super::{RunOutcome, connect};
use crate::cli::output;
use crate::config::{self, DeleteSettings};
use crate::workspaces;

pub async fn delete_command(report_path: Option<&Path>) -> Result<RunOutcome> {
    let (settings, delete) = DeleteSettings::load(&config::env_lookup)?;
    let client = connect(&settings).await?;

    match workspaces::delete_workspaces(&client, &delete.targets).await {
        Ok(report) => {
            output::print_delete_summary(&report);
            if let Some(path) = report_path {
                output::write_delete_report(path, &report)?;
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
