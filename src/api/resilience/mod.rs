//! Retry and backoff for Power BI API calls

pub mod retry;

pub use retry::{RetryConfig, RetryPolicy, RetryableError};
