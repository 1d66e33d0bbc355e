//! Defaults shared by both entry points

/// Namespace holding the database secret
pub const SECRET_NAMESPACE: &str = "infrastructure";

/// Secret carrying the database connection parameters
pub const DATABASE_SECRET: &str = "database-secrets";

/// Chart every deployment is rendered from
pub const CHART_REFERENCE: &str = "oci://registry-1.docker.io/markmorcos/base-chart";

/// Environment variable carrying the deployment token
pub const TOKEN_ENV: &str = "DEPLOYMENT_TOKEN";

pub const KUBECTL_BIN: &str = "kubectl";
pub const HELM_BIN: &str = "helm";

/// Keys inside the database secret.
pub const KEY_DATABASE: &str = "DATABASE";
pub const KEY_USER: &str = "USER";
pub const KEY_PASSWORD: &str = "PASSWORD";
pub const KEY_HOST: &str = "HOST";
