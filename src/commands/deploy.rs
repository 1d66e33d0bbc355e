use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use super::args::ClusterArgs;
use crate::defaults::{CHART_REFERENCE, HELM_BIN, TOKEN_ENV};
use crate::flows::run_deployment;
use crate::infra::helm::HelmDeployer;
use crate::infra::process::SystemRunner;

#[derive(Args, Clone)]
pub struct DeployArgs {
    #[arg(long, env = TOKEN_ENV, hide_env_values = true, help = "Token identifying the deployment")]
    pub token: Option<String>,

    #[command(flatten)]
    pub cluster: ClusterArgs,

    #[arg(long, env = "HELM_BIN", default_value = HELM_BIN, help = "helm executable")]
    pub helm: String,

    #[arg(long, env = "DEPLOY_CHART", default_value = CHART_REFERENCE, help = "Chart to install")]
    pub chart: String,

    #[arg(long, env = "DEPLOY_DRY_RUN", help = "Pass --dry-run to helm")]
    pub dry_run: bool,
}

pub async fn run(args: DeployArgs) -> Result<ExitCode> {
    let store = args.cluster.store(SystemRunner);
    let deployer = HelmDeployer::new(SystemRunner, &args.helm, &args.chart).with_dry_run(args.dry_run);

    let outcome = run_deployment(args.token.as_deref(), &store, &deployer).await?;
    debug!("Deployment run finished: {:?}", outcome);

    Ok(outcome.exit_code())
}
