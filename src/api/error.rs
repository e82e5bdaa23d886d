use reqwest::StatusCode;

/// Failure of a single Power BI API call
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{status} - {body}")]
    Status { status: StatusCode, body: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            ApiError::MissingField(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Drain a non-success response into an error
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ApiError::Status { status, body }
    }
}
