use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::debug;

use super::k8s::SecretAccessor;
use super::process::CommandRunner;
use crate::models::{ChartValues, DatabaseCredentials, Deployment};

const FIND_BY_TOKEN: &str = r#"
    SELECT token, project_name, version::text AS version, enabled, config::text AS config
    FROM deployments
    WHERE token = $1
    LIMIT 1
"#;

/// Source of deployment records.
#[async_trait]
pub trait DeploymentStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<Deployment>>;
}

#[derive(sqlx::FromRow)]
struct DeploymentRow {
    token: String,
    project_name: String,
    version: Option<String>,
    enabled: Option<bool>,
    config: Option<String>,
}

impl DeploymentRow {
    fn into_deployment(self) -> Result<Deployment> {
        let config = match self.config.as_deref() {
            Some(raw) => ChartValues::from_json_str(raw)
                .with_context(|| format!("Invalid config for project {}", self.project_name))?,
            None => ChartValues::default(),
        };

        Ok(Deployment {
            token: self.token,
            project_name: self.project_name,
            version: self.version.unwrap_or_default(),
            enabled: self.enabled.unwrap_or(false),
            config,
        })
    }
}

/// Deployments stored in PostgreSQL, reached with credentials kept in a
/// cluster secret.
pub struct PostgresStore<R> {
    secrets: SecretAccessor<R>,
    secret_name: String,
}

impl<R: CommandRunner> PostgresStore<R> {
    pub fn new(secrets: SecretAccessor<R>, secret_name: impl Into<String>) -> Self {
        Self { secrets, secret_name: secret_name.into() }
    }

    pub fn credentials(&self) -> Result<DatabaseCredentials> {
        DatabaseCredentials::fetch(&self.secrets, &self.secret_name)
    }
}

#[async_trait]
impl<R: CommandRunner + Send + Sync> DeploymentStore for PostgresStore<R> {
    async fn find_by_token(&self, token: &str) -> Result<Option<Deployment>> {
        let credentials = self.credentials()?;
        let pool = connect(&credentials).await?;

        let row = sqlx::query_as::<_, DeploymentRow>(FIND_BY_TOKEN)
            .bind(token)
            .fetch_optional(&pool)
            .await
            .context("Failed to query deployments");
        pool.close().await;

        row?.map(DeploymentRow::into_deployment).transpose()
    }
}

/// Open a single-connection pool; callers close it after their one query.
pub async fn connect(credentials: &DatabaseCredentials) -> Result<PgPool> {
    debug!("Connecting to {}/{} as {}", credentials.host, credentials.dbname, credentials.user);
    PgPoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options(credentials))
        .await
        .context("Failed to connect to database")
}

/// Round-trip a trivial query, for pre-flight checks.
pub async fn ping(credentials: &DatabaseCredentials) -> Result<()> {
    let pool = connect(credentials).await?;
    let answered = sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("Database did not answer");
    pool.close().await;
    answered.map(|_| ())
}

pub fn connect_options(credentials: &DatabaseCredentials) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&credentials.host)
        .username(&credentials.user)
        .password(&credentials.password)
        .database(&credentials.dbname)
}
