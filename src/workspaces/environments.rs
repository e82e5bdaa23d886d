use serde::Serialize;

/// Deployment stage a workspace is created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Environment {
    #[serde(rename = "DEV")]
    Dev,
    #[serde(rename = "UAT")]
    Uat,
    #[serde(rename = "PRD")]
    Prd,
}

impl Environment {
    /// Every environment, in naming order
    pub const ALL: [Environment; 3] = [Environment::Dev, Environment::Uat, Environment::Prd];

    /// Suffix appended to the base workspace name
    pub fn label(&self) -> &'static str {
        match self {
            Environment::Dev => "DEV",
            Environment::Uat => "UAT",
            Environment::Prd => "PRD",
        }
    }

    /// Variable that switches this environment on
    pub fn flag_var(&self) -> &'static str {
        match self {
            Environment::Dev => "CREATE_DEV",
            Environment::Uat => "CREATE_UAT",
            Environment::Prd => "CREATE_PRD",
        }
    }
}

/// Which environments to create workspaces for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvironmentSelection {
    pub dev: bool,
    pub uat: bool,
    pub prd: bool,
}

impl EnvironmentSelection {
    pub fn new(dev: bool, uat: bool, prd: bool) -> Self {
        Self { dev, uat, prd }
    }

    pub fn contains(&self, environment: Environment) -> bool {
        match environment {
            Environment::Dev => self.dev,
            Environment::Uat => self.uat,
            Environment::Prd => self.prd,
        }
    }

    /// Selected environments, always DEV, UAT, PRD order
    pub fn selected(&self) -> Vec<Environment> {
        Environment::ALL
            .into_iter()
            .filter(|env| self.contains(*env))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        !(self.dev || self.uat || self.prd)
    }
}

/// Decode a string-truthy flag. `true`, `1`, `yes`, `on` (any case) are true;
/// everything else, including an unset variable, is false.
pub fn parse_flag(value: Option<&str>) -> bool {
    match value {
        Some(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        None => false,
    }
}
