use std::fmt;

use super::values::ChartValues;

/// One row of the `deployments` table.
#[derive(Clone, PartialEq)]
pub struct Deployment {
    pub token: String,
    pub project_name: String,
    pub version: String,
    pub enabled: bool,
    pub config: ChartValues,
}

// token is a credential
impl fmt::Debug for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deployment")
            .field("token", &"<redacted>")
            .field("project_name", &self.project_name)
            .field("version", &self.version)
            .field("enabled", &self.enabled)
            .field("config", &self.config)
            .finish()
    }
}

/// What a token lookup produced.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(Deployment),
    NotFound,
    Disabled { project_name: String },
}
