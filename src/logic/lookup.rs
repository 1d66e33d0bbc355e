use anyhow::{anyhow, Result};
use tracing::error;

use crate::defaults::TOKEN_ENV;
use crate::infra::db::DeploymentStore;
use crate::models::LookupOutcome;

/// Resolve a token to an enabled deployment.
///
/// A missing or empty token fails before the store is touched. Unknown and
/// disabled deployments are logged here and reported as outcomes.
pub async fn find_deployment<S>(token: Option<&str>, store: &S) -> Result<LookupOutcome>
where
    S: DeploymentStore + ?Sized,
{
    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => return Err(anyhow!("{} environment variable is required", TOKEN_ENV)),
    };

    let deployment = match store.find_by_token(token).await? {
        Some(d) => d,
        None => {
            error!("Deployment not found");
            return Ok(LookupOutcome::NotFound);
        }
    };

    if !deployment.enabled {
        error!("Deployment is not enabled");
        return Ok(LookupOutcome::Disabled { project_name: deployment.project_name });
    }

    Ok(LookupOutcome::Found(deployment))
}
