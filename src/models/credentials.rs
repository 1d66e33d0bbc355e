use std::fmt;

use anyhow::{Context, Result};

use crate::defaults::{KEY_DATABASE, KEY_HOST, KEY_PASSWORD, KEY_USER};
use crate::infra::k8s::SecretAccessor;
use crate::infra::process::CommandRunner;

/// Connection parameters for the deployments database.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseCredentials {
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub host: String,
}

impl DatabaseCredentials {
    /// Read all four connection parameters from `secret_name`.
    pub fn fetch<R: CommandRunner>(accessor: &SecretAccessor<R>, secret_name: &str) -> Result<Self> {
        let read = |key: &str| {
            accessor
                .get_secret(secret_name, key)
                .context("Failed to read database secrets")
        };

        Ok(Self {
            dbname: read(KEY_DATABASE)?,
            user: read(KEY_USER)?,
            password: read(KEY_PASSWORD)?,
            host: read(KEY_HOST)?,
        })
    }
}

impl fmt::Debug for DatabaseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseCredentials")
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::process::CommandOutcome;
    use std::cell::Cell;

    struct SecretJson {
        payload: &'static str,
        calls: Cell<usize>,
    }

    impl CommandRunner for SecretJson {
        fn run(&self, _program: &str, _args: &[String], _input: Option<&str>) -> CommandOutcome {
            self.calls.set(self.calls.get() + 1);
            CommandOutcome::ok(self.payload)
        }
    }

    #[test]
    fn test_fetch_reads_all_four_keys() {
        // app / deploy / s3cret / db.internal
        let runner = SecretJson {
            payload: r#"{"data":{"DATABASE":"YXBw","USER":"ZGVwbG95","PASSWORD":"czNjcmV0","HOST":"ZGIuaW50ZXJuYWw="}}"#,
            calls: Cell::new(0),
        };
        let accessor = SecretAccessor::new(&runner, "kubectl", "infrastructure");

        let creds = DatabaseCredentials::fetch(&accessor, "database-secrets").unwrap();
        assert_eq!(runner.calls.get(), 4);
        assert_eq!(creds.dbname, "app");
        assert_eq!(creds.user, "deploy");
        assert_eq!(creds.password, "s3cret");
        assert_eq!(creds.host, "db.internal");
        assert!(!format!("{:?}", creds).contains("s3cret"));
    }

    #[test]
    fn test_fetch_fails_on_missing_key() {
        let runner = SecretJson { payload: r#"{"data":{"DATABASE":"YXBw"}}"#, calls: Cell::new(0) };
        let accessor = SecretAccessor::new(&runner, "kubectl", "infrastructure");

        let err = DatabaseCredentials::fetch(&accessor, "database-secrets").unwrap_err();
        assert_eq!(err.to_string(), "Failed to read database secrets");
        assert!(format!("{:#}", err).contains("Key USER not found"));
        // stops at the first failure
        assert_eq!(runner.calls.get(), 2);
    }
}
