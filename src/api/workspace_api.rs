use async_trait::async_trait;

use super::error::ApiError;
use super::models::{CreateWorkspaceRequest, Deletion, Workspace};

/// Workspace operations the create and delete workflows depend on.
///
/// `PowerBiClient` is the production implementation; the workflows only see
/// this trait so they can run against an in-memory fake in tests.
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    /// Create one workspace. Never retried.
    async fn create_workspace(
        &self,
        request: &CreateWorkspaceRequest,
    ) -> Result<Workspace, ApiError>;

    /// Grant `identifier` the Admin role on a workspace
    async fn add_workspace_admin(
        &self,
        workspace_id: &str,
        identifier: &str,
    ) -> Result<(), ApiError>;

    /// Every workspace visible to the caller
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, ApiError>;

    /// Delete one workspace; a 404 maps to `Deletion::AlreadyGone`
    async fn delete_workspace(&self, workspace_id: &str) -> Result<Deletion, ApiError>;
}
