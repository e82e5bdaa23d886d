//! In-memory `WorkspaceApi` for workflow tests

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::api::{ApiError, CreateWorkspaceRequest, Deletion, Workspace, WorkspaceApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(String),
    AddAdmin(String, String),
    List,
    Delete(String),
}

#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    capacities: Mutex<Vec<Option<String>>>,
    listing: Vec<Workspace>,
    listing_fails: bool,
    failing_creates: HashSet<String>,
    failing_admins: HashSet<String>,
    failing_deletes: HashSet<String>,
    gone: HashSet<String>,
}

pub fn workspace(id: &str, name: &str) -> Workspace {
    Workspace {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn rejected(status: StatusCode) -> ApiError {
    ApiError::Status {
        status,
        body: "{\"error\":{\"code\":\"Rejected\"}}".to_string(),
    }
}

impl FakeApi {
    pub fn with_listing(mut self, listing: Vec<Workspace>) -> Self {
        self.listing = listing;
        self
    }

    pub fn fail_listing(mut self) -> Self {
        self.listing_fails = true;
        self
    }

    pub fn fail_create(mut self, name: &str) -> Self {
        self.failing_creates.insert(name.to_string());
        self
    }

    pub fn fail_admin(mut self, identifier: &str) -> Self {
        self.failing_admins.insert(identifier.to_string());
        self
    }

    pub fn fail_delete(mut self, id: &str) -> Self {
        self.failing_deletes.insert(id.to_string());
        self
    }

    pub fn already_gone(mut self, id: &str) -> Self {
        self.gone.insert(id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn capacities(&self) -> Vec<Option<String>> {
        self.capacities.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl WorkspaceApi for FakeApi {
    async fn create_workspace(
        &self,
        request: &CreateWorkspaceRequest,
    ) -> Result<Workspace, ApiError> {
        self.record(Call::Create(request.name.clone()));
        self.capacities.lock().unwrap().push(request.capacity_id.clone());

        if self.failing_creates.contains(&request.name) {
            return Err(rejected(StatusCode::CONFLICT));
        }
        Ok(workspace(&format!("id-{}", request.name), &request.name))
    }

    async fn add_workspace_admin(
        &self,
        workspace_id: &str,
        identifier: &str,
    ) -> Result<(), ApiError> {
        self.record(Call::AddAdmin(workspace_id.to_string(), identifier.to_string()));

        if self.failing_admins.contains(identifier) {
            return Err(rejected(StatusCode::BAD_REQUEST));
        }
        Ok(())
    }

    async fn list_workspaces(&self) -> Result<Vec<Workspace>, ApiError> {
        self.record(Call::List);

        if self.listing_fails {
            return Err(rejected(StatusCode::UNAUTHORIZED));
        }
        Ok(self.listing.clone())
    }

    async fn delete_workspace(&self, workspace_id: &str) -> Result<Deletion, ApiError> {
        self.record(Call::Delete(workspace_id.to_string()));

        if self.failing_deletes.contains(workspace_id) {
            Err(rejected(StatusCode::FORBIDDEN))
        } else if self.gone.contains(workspace_id) {
            Ok(Deletion::AlreadyGone)
        } else {
            Ok(Deletion::Deleted)
        }
    }
}
