use clap::Args;

use crate::defaults::{DATABASE_SECRET, KUBECTL_BIN, SECRET_NAMESPACE};
use crate::infra::db::PostgresStore;
use crate::infra::k8s::SecretAccessor;
use crate::infra::process::CommandRunner;

/// Where the database credentials live.
#[derive(Args, Clone, Debug)]
pub struct ClusterArgs {
    #[arg(long, env = "KUBECTL_BIN", default_value = KUBECTL_BIN, help = "kubectl executable")]
    pub kubectl: String,

    #[arg(long, env = "DEPLOY_SECRET_NAMESPACE", default_value = SECRET_NAMESPACE, help = "Namespace of the database secret")]
    pub secret_namespace: String,

    #[arg(long, env = "DEPLOY_SECRET_NAME", default_value = DATABASE_SECRET, help = "Secret holding DATABASE, USER, PASSWORD and HOST")]
    pub secret_name: String,
}

impl ClusterArgs {
    pub fn secrets<R: CommandRunner>(&self, runner: R) -> SecretAccessor<R> {
        SecretAccessor::new(runner, &self.kubectl, &self.secret_namespace)
    }

    pub fn store<R: CommandRunner>(&self, runner: R) -> PostgresStore<R> {
        PostgresStore::new(self.secrets(runner), &self.secret_name)
    }
}
