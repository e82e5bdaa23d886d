//! Run configuration, read once at process entry from environment variables
//! (optionally seeded from a `.env` file) and passed into the workflows.

use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::api::RetryConfig;
use crate::api::constants::{DEFAULT_API_BASE_URL, DEFAULT_AUTHORITY_HOST};
use crate::auth::Credentials;
use crate::workspaces::environments::{Environment, EnvironmentSelection, parse_flag};

pub const AZURE_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const AZURE_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const AZURE_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
pub const AZURE_AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";
pub const POWERBI_API_URL: &str = "POWERBI_API_URL";
pub const POWERBI_MAX_RETRIES: &str = "POWERBI_MAX_RETRIES";
pub const WORKSPACE_NAMES: &str = "WORKSPACE_NAMES";
pub const ADMIN_EMAILS: &str = "ADMIN_EMAILS";
pub const FABRIC_CAPACITY_ID: &str = "FABRIC_CAPACITY_ID";
pub const WORKSPACES_TO_DELETE: &str = "WORKSPACES_TO_DELETE";

/// Source of configuration values, usually the process environment
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("Failed to load env file '{}': {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Load a `.env` file into the process environment. Variables already set
/// win over file values. Without an explicit path a missing `.env` is fine.
pub fn load_env_file(path: Option<&Path>) -> Result<(), ConfigError> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Loaded environment from {}", path.display());
        }
        None => {
            if let Ok(path) = dotenvy::dotenv() {
                debug!("Loaded environment from {}", path.display());
            }
        }
    }
    Ok(())
}

/// Split a comma-separated list, trimming entries and dropping blanks
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collects every missing required variable so they are reported together.
/// Missing variables take precedence over the first unparsable value.
struct Vars<'a> {
    lookup: Lookup<'a>,
    missing: Vec<String>,
    invalid: Option<(&'static str, String)>,
}

impl<'a> Vars<'a> {
    fn new(lookup: Lookup<'a>) -> Self {
        Self {
            lookup,
            missing: Vec::new(),
            invalid: None,
        }
    }

    /// Trimmed value; empty counts as unset
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&mut self, name: &str) -> String {
        match self.optional(name) {
            Some(value) => value,
            None => {
                self.missing.push(name.to_string());
                String::new()
            }
        }
    }

    fn flag(&self, name: &str) -> bool {
        parse_flag((self.lookup)(name).as_deref())
    }

    /// Parsed optional value; an unparsable one is recorded and reads as unset
    fn parsed<T: FromStr>(&mut self, name: &'static str) -> Option<T> {
        let value = self.optional(name)?;
        match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.invalid.get_or_insert((name, value));
                None
            }
        }
    }

    fn finish(self) -> Result<(), ConfigError> {
        if !self.missing.is_empty() {
            return Err(ConfigError::Missing(self.missing));
        }
        match self.invalid {
            Some((name, value)) => Err(ConfigError::Invalid { name, value }),
            None => Ok(()),
        }
    }
}

/// Service endpoints, overridable for sovereign clouds and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub authority_host: String,
    pub api_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

/// Settings shared by both workflows
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    pub retry: RetryConfig,
}

impl Settings {
    fn read(vars: &mut Vars<'_>) -> Self {
        let tenant_id = vars.required(AZURE_TENANT_ID);
        let client_id = vars.required(AZURE_CLIENT_ID);
        let client_secret = vars.required(AZURE_CLIENT_SECRET);

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            authority_host: vars
                .optional(AZURE_AUTHORITY_HOST)
                .unwrap_or(defaults.authority_host),
            api_base_url: vars.optional(POWERBI_API_URL).unwrap_or(defaults.api_base_url),
        };

        let retry = match vars.parsed::<u32>(POWERBI_MAX_RETRIES) {
            Some(attempts) => RetryConfig::default().with_max_attempts(attempts),
            None => RetryConfig::default(),
        };

        Self {
            credentials: Credentials::new(tenant_id, client_id, client_secret),
            endpoints,
            retry,
        }
    }
}

/// Inputs of the create workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSettings {
    pub base_names: Vec<String>,
    pub admin_emails: Vec<String>,
    pub capacity_id: Option<String>,
    pub environments: EnvironmentSelection,
}

impl CreateSettings {
    fn read(vars: &mut Vars<'_>) -> Self {
        let base_names = split_list(&vars.required(WORKSPACE_NAMES));
        let admin_emails = split_list(&vars.optional(ADMIN_EMAILS).unwrap_or_default());
        let capacity_id = vars.optional(FABRIC_CAPACITY_ID);

        let environments = EnvironmentSelection::new(
            vars.flag(Environment::Dev.flag_var()),
            vars.flag(Environment::Uat.flag_var()),
            vars.flag(Environment::Prd.flag_var()),
        );

        Self {
            base_names,
            admin_emails,
            capacity_id,
            environments,
        }
    }

    /// Read shared and create settings, reporting all missing variables at once
    pub fn load(lookup: Lookup<'_>) -> Result<(Settings, Self), ConfigError> {
        let mut vars = Vars::new(lookup);
        let settings = Settings::read(&mut vars);
        let create = Self::read(&mut vars);
        vars.finish()?;

        if create.capacity_id.is_none() {
            warn!(
                "{} not set → workspaces will be created without assigned capacity",
                FABRIC_CAPACITY_ID
            );
        }

        Ok((settings, create))
    }
}

/// Inputs of the delete workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSettings {
    pub targets: BTreeSet<String>,
}

impl DeleteSettings {
    fn read(vars: &mut Vars<'_>) -> Self {
        let targets = split_list(&vars.required(WORKSPACES_TO_DELETE))
            .into_iter()
            .collect();
        Self { targets }
    }

    /// Read shared and delete settings, reporting all missing variables at once
    pub fn load(lookup: Lookup<'_>) -> Result<(Settings, Self), ConfigError> {
        let mut vars = Vars::new(lookup);
        let settings = Settings::read(&mut vars);
        let delete = Self::read(&mut vars);
        vars.finish()?;
        Ok((settings, delete))
    }
}
