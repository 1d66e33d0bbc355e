use anyhow::{ensure, Result};
use tracing::info;

use super::process::{CommandOutcome, CommandRunner};
use crate::models::ChartValues;

/// A fully rendered `helm` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelmInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub values_yaml: String,
}

/// Installs or upgrades a project's release from a fixed chart.
#[derive(Debug, Clone)]
pub struct HelmDeployer<R> {
    runner: R,
    helm: String,
    chart: String,
    dry_run: bool,
}

impl<R: CommandRunner> HelmDeployer<R> {
    pub fn new(runner: R, helm: impl Into<String>, chart: impl Into<String>) -> Self {
        Self { runner, helm: helm.into(), chart: chart.into(), dry_run: false }
    }

    /// Let helm render and validate without touching the cluster.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Build the `upgrade --install` call. The release and namespace are both
    /// the project name; values go in through stdin.
    pub fn invocation(&self, project_name: &str, values: &ChartValues) -> Result<HelmInvocation> {
        ensure!(!project_name.is_empty(), "Project name is empty");
        let chart_version = values.chart_version()?;
        let values_yaml = values.to_yaml()?;

        let mut args: Vec<String> = [
            "upgrade",
            "--install",
            project_name,
            self.chart.as_str(),
            "--version",
            chart_version,
            "-f",
            "-",
            "-n",
            project_name,
            "--create-namespace",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        if self.dry_run {
            args.push("--dry-run".to_string());
        }

        Ok(HelmInvocation { program: self.helm.clone(), args, values_yaml })
    }

    /// Run the release. Command failures come back as an unsuccessful
    /// outcome carrying helm's stderr; they are logged by the runner.
    pub fn deploy(&self, project_name: &str, values: &ChartValues) -> Result<CommandOutcome> {
        let call = self.invocation(project_name, values)?;
        let outcome = self.runner.run(&call.program, &call.args, Some(&call.values_yaml));

        if outcome.success {
            if self.dry_run {
                info!("Dry run of {} rendered with Helm", project_name);
            } else {
                info!("Successfully deployed {} with Helm", project_name);
            }
        }
        Ok(outcome)
    }
}
