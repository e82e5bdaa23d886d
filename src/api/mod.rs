//! Power BI REST API client
//!
//! Typed access to the workspace ("group") endpoints used by the create and
//! delete workflows, with retry for the idempotent calls.

pub mod client;
pub mod constants;
pub mod error;
pub mod models;
pub mod resilience;
pub mod workspace_api;

pub use client::{PowerBiClient, build_http_client};
pub use error::ApiError;
pub use models::{CreateWorkspaceRequest, Deletion, GroupUserRequest, Workspace};
pub use resilience::{RetryConfig, RetryPolicy, RetryableError};
pub use workspace_api::WorkspaceApi;
