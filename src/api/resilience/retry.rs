//! Retry policies with exponential backoff
//!
//! Only idempotent calls (listing, deleting) go through a retrying policy.
//! Creating a workspace is never retried: a create that failed ambiguously
//! may already exist on the server.

use log::{debug, info, warn};
use rand::Rng;
use reqwest::{Response, StatusCode, header::RETRY_AFTER};
use std::future::Future;
use std::time::Duration;

use crate::api::ApiError;

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

/// Types of errors and their retry behavior
#[derive(Debug, Clone, PartialEq)]
pub enum RetryableError {
    /// Network-level errors (connection refused, DNS, etc)
    Network,
    /// HTTP 5xx server errors
    ServerError(u16),
    /// HTTP 429 Too Many Requests
    RateLimited,
    /// HTTP 408 or a client-side timeout
    Timeout,
    /// Non-retryable client errors (4xx except 408, 429)
    ClientError(u16),
    Unknown,
}

impl RetryableError {
    pub fn should_retry(&self) -> bool {
        match self {
            RetryableError::Network => true,
            RetryableError::ServerError(_) => true,
            RetryableError::RateLimited => true,
            RetryableError::Timeout => true,
            RetryableError::ClientError(_) => false,
            RetryableError::Unknown => false,
        }
    }

    /// Classify an HTTP status code into retry behavior
    pub fn from_status_code(status: u16) -> Self {
        match status {
            408 => RetryableError::Timeout,
            429 => RetryableError::RateLimited,
            400..=499 => RetryableError::ClientError(status),
            500..=599 => RetryableError::ServerError(status),
            _ => RetryableError::Unknown,
        }
    }

    /// Classify a reqwest error
    pub fn from_reqwest_error(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            RetryableError::Timeout
        } else if error.is_connect() || error.is_request() {
            RetryableError::Network
        } else if let Some(status) = error.status() {
            Self::from_status_code(status.as_u16())
        } else {
            RetryableError::Unknown
        }
    }
}

/// Retry policy that implements exponential backoff with jitter
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Send a request, retrying transport failures and retryable statuses.
    ///
    /// Returns the last response even when its status is an error; the caller
    /// decides what a non-success status means for its operation.
    pub async fn execute<F, Fut>(&self, label: &str, operation: F) -> Result<Response, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Response, reqwest::Error>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            debug!("{} (attempt {}/{})", label, attempt, max_attempts);

            let delay = match operation().await {
                Ok(response) => {
                    let status = response.status();
                    let retryable = !status.is_success()
                        && RetryableError::from_status_code(status.as_u16()).should_retry();

                    if !retryable || attempt >= max_attempts {
                        if attempt > 1 && status.is_success() {
                            info!("{} succeeded after {} attempts", label, attempt);
                        }
                        return Ok(response);
                    }

                    warn!("{} returned {} on attempt {} (retryable)", label, status, attempt);
                    retry_after(&response)
                        .map(|d| d.min(self.config.max_delay))
                        .unwrap_or_else(|| self.calculate_delay(attempt))
                }
                Err(error) => {
                    let should_retry = RetryableError::from_reqwest_error(&error).should_retry();

                    if !should_retry || attempt >= max_attempts {
                        warn!(
                            "{} failed permanently on attempt {} (should_retry: {}): {}",
                            label, attempt, should_retry, error
                        );
                        return Err(error.into());
                    }

                    warn!("{} failed on attempt {} (retryable): {}", label, attempt, error);
                    self.calculate_delay(attempt)
                }
            };

            debug!("Waiting {:?} before retry", delay);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Calculate exponential backoff delay with optional jitter
    fn calculate_delay(&self, attempt: u32) -> Duration {
        let delay_ms = (self.config.base_delay.as_millis() as f64)
            * self.config.backoff_multiplier.powi(attempt as i32 - 1);

        let mut delay = Duration::from_millis(delay_ms as u64).min(self.config.max_delay);

        if self.config.jitter {
            let jitter_factor = rand::rng().random_range(0.5..=1.5);
            delay = Duration::from_millis((delay.as_millis() as f64 * jitter_factor) as u64);
        }

        delay
    }
}

/// `Retry-After` in seconds, as sent with 429 and 503 responses
fn retry_after(response: &Response) -> Option<Duration> {
    if !matches!(
        response.status(),
        StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
    ) {
        return None;
    }

    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
