use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use std::collections::HashSet;
use std::time::Duration;

use super::constants::{self, headers};
use super::error::ApiError;
use super::models::{CreateWorkspaceRequest, Deletion, GroupUserRequest, ODataList, Workspace};
use super::resilience::{RetryConfig, RetryPolicy};
use super::workspace_api::WorkspaceApi;
use crate::auth::AccessToken;

/// Build the HTTP client shared by the authenticator and the API client
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(constants::USER_AGENT)
        .build()
}

/// Power BI REST API client bound to one bearer token
#[derive(Debug, Clone)]
pub struct PowerBiClient {
    base_url: String,
    http_client: reqwest::Client,
    access_token: AccessToken,
    retry_policy: RetryPolicy,
    page_size: usize,
}

impl PowerBiClient {
    pub fn new(
        base_url: impl Into<String>,
        http_client: reqwest::Client,
        access_token: AccessToken,
        retry_config: RetryConfig,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
            access_token,
            retry_policy: RetryPolicy::new(retry_config),
            page_size: constants::LIST_PAGE_SIZE,
        }
    }

    /// Override the listing page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn token(&self) -> &str {
        self.access_token.secret().expose_secret()
    }

    async fn list_page(&self, skip: usize) -> Result<Vec<Workspace>, ApiError> {
        let url = constants::groups_page_endpoint(&self.base_url, self.page_size, skip);

        let response = self
            .retry_policy
            .execute("List workspaces", || {
                self.http_client
                    .get(&url)
                    .bearer_auth(self.token())
                    .header("Accept", headers::CONTENT_TYPE_JSON)
                    .send()
            })
            .await?;

        if response.status() != StatusCode::OK {
            return Err(ApiError::from_response(response).await);
        }

        let page: ODataList<Workspace> = response.json().await?;
        Ok(page.value)
    }
}

#[async_trait]
impl WorkspaceApi for PowerBiClient {
    async fn create_workspace(
        &self,
        request: &CreateWorkspaceRequest,
    ) -> Result<Workspace, ApiError> {
        let url = constants::groups_endpoint(&self.base_url);
        debug!("POST {} ({})", url, request.name);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.token())
            .header("Content-Type", headers::CONTENT_TYPE_JSON)
            .json(request)
            .send()
            .await?;

        if !matches!(response.status(), StatusCode::OK | StatusCode::CREATED) {
            return Err(ApiError::from_response(response).await);
        }

        let body: serde_json::Value = response.json().await?;
        let id = body
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or(ApiError::MissingField("id"))?;
        let name = body
            .get("name")
            .and_then(|name| name.as_str())
            .unwrap_or(&request.name);

        Ok(Workspace {
            id: id.to_string(),
            name: name.to_string(),
        })
    }

    async fn add_workspace_admin(
        &self,
        workspace_id: &str,
        identifier: &str,
    ) -> Result<(), ApiError> {
        let url = constants::group_users_endpoint(&self.base_url, workspace_id);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.token())
            .header("Content-Type", headers::CONTENT_TYPE_JSON)
            .json(&GroupUserRequest::admin(identifier))
            .send()
            .await?;

        if matches!(response.status(), StatusCode::OK | StatusCode::CREATED) {
            Ok(())
        } else {
            Err(ApiError::from_response(response).await)
        }
    }

    /// Pages through the listing. A workspace seen on an earlier page is kept
    /// once; a full page with nothing new ends the listing.
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, ApiError> {
        let mut workspaces = Vec::new();
        let mut seen = HashSet::new();
        let mut skip = 0;

        for page_number in 1..=constants::MAX_LIST_PAGES {
            let page = self.list_page(skip).await?;
            let page_len = page.len();
            skip += page_len;

            let before = workspaces.len();
            workspaces.extend(page.into_iter().filter(|ws| seen.insert(ws.id.clone())));

            if page_len < self.page_size {
                break;
            }
            if workspaces.len() == before {
                warn!(
                    "Listing page {} repeated workspaces already seen; stopping at {}",
                    page_number,
                    workspaces.len()
                );
                break;
            }
            if page_number == constants::MAX_LIST_PAGES {
                warn!(
                    "Stopped listing after {} pages; workspaces beyond {} are not considered",
                    page_number,
                    workspaces.len()
                );
                break;
            }
            debug!("Fetched {} workspaces so far, requesting next page", workspaces.len());
        }

        info!("Listed {} accessible workspaces", workspaces.len());
        Ok(workspaces)
    }

    async fn delete_workspace(&self, workspace_id: &str) -> Result<Deletion, ApiError> {
        let url = constants::group_endpoint(&self.base_url, workspace_id);

        let response = self
            .retry_policy
            .execute("Delete workspace", || {
                self.http_client
                    .delete(&url)
                    .bearer_auth(self.token())
                    .send()
            })
            .await?;

        if matches!(
            response.status(),
            StatusCode::OK | StatusCode::ACCEPTED | StatusCode::NO_CONTENT
        ) {
            return Ok(Deletion::Deleted);
        }

        match ApiError::from_response(response).await {
            err if err.is_not_found() => Ok(Deletion::AlreadyGone),
            err => Err(err),
        }
    }
}
