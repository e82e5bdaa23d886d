use secrecy::SecretString;
use std::time::{Duration, SystemTime};

/// Token lifetime assumed when the provider omits `expires_in`
pub const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Bearer token for the duration of one run. Not refreshed.
#[derive(Debug, Clone)]
pub struct AccessToken {
    secret: SecretString,
    expires_at: SystemTime,
}

impl AccessToken {
    /// An `expires_in` too large to represent falls back to the default
    /// lifetime
    pub fn new(secret: impl Into<String>, expires_in: Duration) -> Self {
        let now = SystemTime::now();
        let expires_at = now
            .checked_add(expires_in)
            .or_else(|| now.checked_add(Duration::from_secs(DEFAULT_EXPIRES_IN)))
            .unwrap_or(now);

        Self {
            secret: SecretString::from(secret.into()),
            expires_at,
        }
    }

    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    pub fn is_expired(&self) -> bool {
        SystemTime::now() >= self.expires_at
    }
}
