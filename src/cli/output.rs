//! Run summaries for the terminal and JSON report files

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::workspaces::report::{AdminStatus, CreateStatus, DeleteStatus};
use crate::workspaces::{CreateReport, DeleteReport, WorkflowError};

#[derive(Serialize)]
struct ReportFile<'a, R: Serialize> {
    workflow: &'static str,
    success_count: usize,
    total: usize,
    report: &'a R,
}

pub fn print_create_summary(report: &CreateReport) {
    for ws in &report.workspaces {
        match &ws.status {
            CreateStatus::Created { id } => {
                println!("{} {} {}", "✓".green(), ws.name.bold(), format!("({})", id).dimmed());
            }
            CreateStatus::SkippedDuplicate => {
                println!("{} {} {}", "-".yellow(), ws.name, "(duplicate, skipped)".dimmed());
            }
            CreateStatus::Failed { reason } => {
                println!("{} {} {}", "✗".red(), ws.name.bold(), reason.red());
            }
        }
        for admin in &ws.admins {
            if let AdminStatus::Failed { reason } = &admin.status {
                println!("    {} admin {}: {}", "!".yellow(), admin.identifier, reason);
            }
        }
    }

    let created = report.success_count();
    let attempted = report.workspaces.len();
    let line = format!("Created {}/{} workspaces", created, attempted);
    if report.has_failures() {
        println!(
            "{} ({} failed, {} admin assignments failed)",
            line.yellow().bold(),
            report.failure_count(),
            report.admin_failure_count()
        );
    } else {
        println!("{}", line.green().bold());
    }
}

pub fn print_delete_summary(report: &DeleteReport) {
    for ws in &report.workspaces {
        match &ws.status {
            DeleteStatus::Deleted => {
                let id = format!("({})", ws.id);
                println!("{} {} {}", "✓".green(), ws.name.bold(), id.dimmed());
            }
            DeleteStatus::AlreadyGone => {
                println!("{} {} {}", "✓".green(), ws.name.bold(), "(already deleted)".dimmed());
            }
            DeleteStatus::Failed { reason } => {
                println!("{} {} {}", "✗".red(), ws.name.bold(), reason.red());
            }
        }
    }
    for name in &report.not_found {
        println!("{} {} {}", "-".yellow(), name, "(not found)".dimmed());
    }

    let line = format!(
        "Deleted {}/{} workspaces",
        report.success_count(),
        report.total_found()
    );
    if report.has_failures() {
        println!("{}", line.yellow().bold());
    } else {
        println!("{}", line.green().bold());
    }
}

pub fn print_aborted(err: &WorkflowError) {
    println!("{} {}", "✗".red(), err.to_string().red());
    if let Some(hint) = err.hint() {
        println!("  {}", hint.dimmed());
    }
}

pub fn write_create_report(path: &Path, report: &CreateReport) -> Result<()> {
    write_report(
        path,
        &ReportFile {
            workflow: "create",
            success_count: report.success_count(),
            total: report.workspaces.len(),
            report,
        },
    )
}

pub fn write_delete_report(path: &Path, report: &DeleteReport) -> Result<()> {
    write_report(
        path,
        &ReportFile {
            workflow: "delete",
            success_count: report.success_count(),
            total: report.total_found(),
            report,
        },
    )
}

fn write_report<R: Serialize>(path: &Path, file: &ReportFile<'_, R>) -> Result<()> {
    let json = serde_json::to_string_pretty(file).context("Failed to serialize run report")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write report to: {}", path.display()))?;
    log::info!("Run report saved to {}", path.display());
    Ok(())
}
