//! Per-item outcomes of a run, returned to the caller instead of only logged

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::environments::Environment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CreateStatus {
    Created { id: String },
    /// Same full name already handled earlier in this run
    SkippedDuplicate,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdminStatus {
    Added,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminOutcome {
    pub identifier: String,
    #[serde(flatten)]
    pub status: AdminStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceCreation {
    pub name: String,
    pub environment: Environment,
    #[serde(flatten)]
    pub status: CreateStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub admins: Vec<AdminOutcome>,
}

impl WorkspaceCreation {
    pub fn is_created(&self) -> bool {
        matches!(self.status, CreateStatus::Created { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub capacity_id: Option<String>,
    pub workspaces: Vec<WorkspaceCreation>,
}

impl CreateReport {
    pub fn new(capacity_id: Option<String>) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            capacity_id,
            workspaces: Vec::new(),
        }
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    /// Workspaces created, regardless of admin assignment
    pub fn success_count(&self) -> usize {
        self.workspaces.iter().filter(|w| w.is_created()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.workspaces
            .iter()
            .filter(|w| matches!(w.status, CreateStatus::Failed { .. }))
            .count()
    }

    pub fn admin_failure_count(&self) -> usize {
        self.workspaces
            .iter()
            .flat_map(|w| &w.admins)
            .filter(|a| matches!(a.status, AdminStatus::Failed { .. }))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0 || self.admin_failure_count() > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeleteStatus {
    Deleted,
    /// The API answered 404
    AlreadyGone,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceDeletion {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub status: DeleteStatus,
}

impl WorkspaceDeletion {
    pub fn is_success(&self) -> bool {
        matches!(self.status, DeleteStatus::Deleted | DeleteStatus::AlreadyGone)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub targets: Vec<String>,
    /// Targets that matched no listed workspace
    pub not_found: Vec<String>,
    pub workspaces: Vec<WorkspaceDeletion>,
}

impl DeleteReport {
    pub fn new(targets: Vec<String>) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            targets,
            not_found: Vec::new(),
            workspaces: Vec::new(),
        }
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn success_count(&self) -> usize {
        self.workspaces.iter().filter(|w| w.is_success()).count()
    }

    pub fn total_found(&self) -> usize {
        self.workspaces.len()
    }

    pub fn has_failures(&self) -> bool {
        self.success_count() < self.total_found()
    }
}
