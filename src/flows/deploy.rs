use std::process::ExitCode;

use anyhow::Result;
use tracing::info;

use crate::infra::db::DeploymentStore;
use crate::infra::helm::HelmDeployer;
use crate::infra::process::CommandRunner;
use crate::logic::lookup::find_deployment;
use crate::models::LookupOutcome;

/// How a deployment run ended, short of a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Deployed { project_name: String, version: String },
    NotFound,
    Disabled { project_name: String },
    HelmFailed { project_name: String, reason: String },
}

impl DeployOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeployOutcome::Deployed { .. })
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Look the token up, then release the deployment with helm.
///
/// Each step stops the run on failure; nothing is rolled back.
pub async fn run_deployment<S, R>(
    token: Option<&str>,
    store: &S,
    deployer: &HelmDeployer<R>,
) -> Result<DeployOutcome>
where
    S: DeploymentStore + ?Sized,
    R: CommandRunner,
{
    let deployment = match find_deployment(token, store).await? {
        LookupOutcome::Found(d) => d,
        LookupOutcome::NotFound => return Ok(DeployOutcome::NotFound),
        LookupOutcome::Disabled { project_name } => return Ok(DeployOutcome::Disabled { project_name }),
    };

    info!(
        "Starting deployment for {} version {}",
        deployment.project_name, deployment.version
    );

    let outcome = deployer.deploy(&deployment.project_name, &deployment.config)?;
    if !outcome.success {
        return Ok(DeployOutcome::HelmFailed {
            project_name: deployment.project_name,
            reason: outcome.output,
        });
    }

    info!(
        "Deployment of {} version {} completed successfully",
        deployment.project_name, deployment.version
    );

    Ok(DeployOutcome::Deployed {
        project_name: deployment.project_name,
        version: deployment.version,
    })
}
