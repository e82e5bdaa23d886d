use log::{error, info};
use std::collections::BTreeSet;

use super::WorkflowError;
use super::report::{DeleteReport, DeleteStatus, WorkspaceDeletion};
use crate::api::{Deletion, Workspace, WorkspaceApi};

/// Listed workspaces whose trimmed name is exactly one of `targets`.
///
/// Workspaces sharing a name are all returned; ids are what gets deleted.
pub fn match_targets(listing: &[Workspace], targets: &BTreeSet<String>) -> Vec<Workspace> {
    listing
        .iter()
        .filter(|ws| targets.contains(ws.name.trim()))
        .map(|ws| Workspace {
            id: ws.id.clone(),
            name: ws.name.trim().to_string(),
        })
        .collect()
}

/// Delete every visible workspace whose name is in `targets`.
///
/// A 404 on delete counts as success. Any other failure is recorded and the
/// remaining deletions still run.
pub async fn delete_workspaces<A>(
    api: &A,
    targets: &BTreeSet<String>,
) -> Result<DeleteReport, WorkflowError>
where
    A: WorkspaceApi + ?Sized,
{
    if targets.is_empty() {
        return Err(WorkflowError::NoDeletionTargets);
    }

    let target_list: Vec<String> = targets.iter().cloned().collect();
    info!("Workspaces targeted for deletion: {}", target_list.join(", "));

    let listing = api
        .list_workspaces()
        .await
        .map_err(WorkflowError::Listing)?;

    let mut report = DeleteReport::new(target_list);

    if listing.is_empty() {
        info!("No workspaces accessible");
    }

    let found = match_targets(&listing, targets);
    let found_names: BTreeSet<&str> = found.iter().map(|ws| ws.name.as_str()).collect();
    report.not_found = targets
        .iter()
        .filter(|name| !found_names.contains(name.as_str()))
        .cloned()
        .collect();

    if found.is_empty() {
        info!("None of the specified workspaces were found");
        return Ok(report.finish());
    }

    info!("Found {} matching workspaces:", found.len());
    let mut sorted: Vec<&Workspace> = found.iter().collect();
    sorted.sort_by(|a, b| (&a.name, &a.id).cmp(&(&b.name, &b.id)));
    for ws in sorted {
        info!("  • {} ({})", ws.name, ws.id);
    }

    for ws in found {
        let status = match api.delete_workspace(&ws.id).await {
            Ok(Deletion::Deleted) => {
                info!("Deleted: {} ({})", ws.name, ws.id);
                DeleteStatus::Deleted
            }
            Ok(Deletion::AlreadyGone) => {
                info!("Already deleted: {}", ws.name);
                DeleteStatus::AlreadyGone
            }
            Err(err) => {
                error!("Delete failed for '{}': {}", ws.name, err);
                DeleteStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };

        report.workspaces.push(WorkspaceDeletion {
            id: ws.id,
            name: ws.name,
            status,
        });
    }

    info!(
        "Deletion completed. Successfully deleted {}/{} workspaces.",
        report.success_count(),
        report.total_found()
    );
    Ok(report.finish())
}
