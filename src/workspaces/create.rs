use log::{error, info, warn};
use std::collections::HashSet;

use super::WorkflowError;
use super::environments::{Environment, EnvironmentSelection};
use super::report::{AdminOutcome, AdminStatus, CreateReport, CreateStatus, WorkspaceCreation};
use crate::api::{CreateWorkspaceRequest, WorkspaceApi};
use crate::config::CreateSettings;

/// Full workspace name for a base name and environment
pub fn compose_name(base_name: &str, environment: Environment) -> String {
    format!("{} {}", base_name, environment.label()).trim().to_string()
}

/// Every workspace to create: base names outer, environments inner
pub fn workspace_names(
    base_names: &[String],
    environments: &EnvironmentSelection,
) -> Vec<(String, Environment)> {
    let selected = environments.selected();

    base_names
        .iter()
        .flat_map(|base| {
            selected
                .iter()
                .map(move |env| (compose_name(base, *env), *env))
        })
        .collect()
}

/// Create one workspace per base name and selected environment, then assign
/// admins to each workspace that was created.
///
/// Every create call is issued once; a failure is recorded and the loop moves
/// on. Admin failures are recorded on the workspace and never change whether
/// the workspace counts as created.
pub async fn create_workspaces<A>(
    api: &A,
    settings: &CreateSettings,
) -> Result<CreateReport, WorkflowError>
where
    A: WorkspaceApi + ?Sized,
{
    if settings.base_names.is_empty() {
        return Err(WorkflowError::NoWorkspaceNames);
    }
    if settings.environments.is_empty() {
        return Err(WorkflowError::NoEnvironmentsSelected);
    }

    info!("Base workspace names: {}", settings.base_names.join(", "));
    if settings.admin_emails.is_empty() {
        warn!("No admin emails provided → only the service principal will be a member");
    } else {
        info!("Admins to assign: {}", settings.admin_emails.join(", "));
    }

    let selected: Vec<&str> = settings
        .environments
        .selected()
        .iter()
        .map(|env| env.label())
        .collect();
    info!("Selected environments: {}", selected.join(", "));

    let mut report = CreateReport::new(settings.capacity_id.clone());
    let mut seen = HashSet::new();

    for (name, environment) in workspace_names(&settings.base_names, &settings.environments) {
        if !seen.insert(name.clone()) {
            warn!("Skipping duplicate workspace name: {}", name);
            report.workspaces.push(WorkspaceCreation {
                name,
                environment,
                status: CreateStatus::SkippedDuplicate,
                admins: Vec::new(),
            });
            continue;
        }

        info!("Creating: {}", name);
        let request = CreateWorkspaceRequest::new(name.clone(), settings.capacity_id.clone());

        let creation = match api.create_workspace(&request).await {
            Ok(workspace) => {
                info!("Workspace created: {} ({})", name, workspace.id);
                let admins = assign_admins(api, &workspace.id, &settings.admin_emails).await;
                WorkspaceCreation {
                    name,
                    environment,
                    status: CreateStatus::Created { id: workspace.id },
                    admins,
                }
            }
            Err(err) => {
                error!("Failed to create workspace '{}': {}", name, err);
                WorkspaceCreation {
                    name,
                    environment,
                    status: CreateStatus::Failed {
                        reason: err.to_string(),
                    },
                    admins: Vec::new(),
                }
            }
        };

        report.workspaces.push(creation);
    }

    info!(
        "Finished. Successfully created {} workspaces.",
        report.success_count()
    );
    Ok(report.finish())
}

async fn assign_admins<A>(api: &A, workspace_id: &str, admin_emails: &[String]) -> Vec<AdminOutcome>
where
    A: WorkspaceApi + ?Sized,
{
    let mut outcomes = Vec::with_capacity(admin_emails.len());

    for email in admin_emails {
        let status = match api.add_workspace_admin(workspace_id, email).await {
            Ok(()) => {
                info!("  → Added admin: {}", email);
                AdminStatus::Added
            }
            Err(err) => {
                warn!("  → Failed to add admin {}: {}", email, err);
                AdminStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };

        outcomes.push(AdminOutcome {
            identifier: email.clone(),
            status,
        });
    }

    outcomes
}
