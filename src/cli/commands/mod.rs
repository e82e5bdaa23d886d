pub mod create;
pub mod delete;

pub use create::create_command;
pub use delete::delete_command;

use anyhow::{Context, Result};
use log::debug;
use std::process::ExitCode;

use crate::api::{PowerBiClient, build_http_client};
use crate::auth::AuthClient;
use crate::config::Settings;

/// Exit status for `--strict` when a run had failures or did nothing
pub const STRICT_FAILURE_CODE: u8 = 2;

/// How a workflow run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { has_failures: bool },
    /// Stopped before any workspace operation (empty input, listing failure)
    Aborted,
}

impl RunOutcome {
    pub fn exit_status(&self, strict: bool) -> u8 {
        match self {
            RunOutcome::Completed { has_failures: false } => 0,
            _ if strict => STRICT_FAILURE_CODE,
            _ => 0,
        }
    }

    pub fn exit_code(&self, strict: bool) -> ExitCode {
        ExitCode::from(self.exit_status(strict))
    }
}

/// Authenticate the service principal and build an API client.
/// Any failure here is fatal for the run.
pub async fn connect(settings: &Settings) -> Result<PowerBiClient> {
    let http_client = build_http_client().context("Failed to build HTTP client")?;
    connect_with(settings, http_client).await
}

/// As [`connect`], over an existing HTTP client
pub async fn connect_with(
    settings: &Settings,
    http_client: reqwest::Client,
) -> Result<PowerBiClient> {
    let token = AuthClient::new(http_client.clone(), settings.endpoints.authority_host.as_str())
        .authenticate(&settings.credentials)
        .await?;

    debug!("Using Power BI API at {}", settings.endpoints.api_base_url);
    Ok(PowerBiClient::new(
        settings.endpoints.api_base_url.as_str(),
        http_client,
        token,
        settings.retry.clone(),
    ))
}
