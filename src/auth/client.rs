use log::{debug, info};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::Duration;

use super::credentials::Credentials;
use super::token::{AccessToken, DEFAULT_EXPIRES_IN};
use crate::api::constants;

/// Failure to obtain a token. Always fatal for a run.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication failed: {status} - {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("Authentication response did not contain an access token")]
    MissingAccessToken,
    #[error("Authentication request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

/// OAuth2 client-credentials authenticator against Microsoft Entra ID
pub struct AuthClient {
    client: Client,
    authority_host: String,
}

impl AuthClient {
    pub fn new(client: Client, authority_host: impl Into<String>) -> Self {
        Self {
            client,
            authority_host: authority_host.into(),
        }
    }

    /// Exchange service principal credentials for a bearer token
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken, AuthError> {
        let token_url = constants::token_endpoint(&self.authority_host, &credentials.tenant_id);
        debug!(
            "Requesting token from {} with client_id {}",
            token_url, credentials.client_id
        );

        let response = self
            .client
            .post(&token_url)
            .form(&[
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.expose_secret()),
                ("grant_type", "client_credentials"),
                ("scope", constants::POWERBI_SCOPE),
            ])
            .send()
            .await?;

        debug!("Token request status: {}", response.status());

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected { status, body });
        }

        let token: TokenResponse = response.json().await?;
        let access_token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingAccessToken)?;
        let expires_in = Duration::from_secs(token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN));

        info!("Authentication successful");
        debug!("Access token valid for {}s", expires_in.as_secs());

        Ok(AccessToken::new(access_token, expires_in))
    }
}
