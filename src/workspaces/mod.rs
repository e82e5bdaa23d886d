//! Workspace lifecycle workflows: per-environment creation and deletion by name

pub mod create;
pub mod delete;
pub mod environments;
pub mod report;

#[cfg(test)]
pub(crate) mod testing;

pub use create::{compose_name, create_workspaces, workspace_names};
pub use delete::{delete_workspaces, match_targets};
pub use environments::{Environment, EnvironmentSelection, parse_flag};
pub use report::{CreateReport, DeleteReport};

use crate::api::ApiError;

/// A workflow that stopped before touching any workspace
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("No workspace names provided")]
    NoWorkspaceNames,
    #[error("No environments selected (DEV/UAT/PRD). Nothing to create.")]
    NoEnvironmentsSelected,
    #[error("No workspace names provided for deletion")]
    NoDeletionTargets,
    #[error("Failed to list workspaces: {0}")]
    Listing(#[source] ApiError),
}

impl WorkflowError {
    /// Follow-up advice shown alongside the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            WorkflowError::NoEnvironmentsSelected => {
                Some("Tip: set at least one of CREATE_DEV, CREATE_UAT, CREATE_PRD to true.")
            }
            WorkflowError::NoWorkspaceNames => {
                Some("Tip: WORKSPACE_NAMES takes a comma-separated list of base names.")
            }
            _ => None,
        }
    }
}
