use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use tracing::debug;

use super::process::CommandRunner;

/// Reads values out of Kubernetes secrets through `kubectl`.
#[derive(Debug, Clone)]
pub struct SecretAccessor<R> {
    runner: R,
    kubectl: String,
    namespace: String,
}

impl<R: CommandRunner> SecretAccessor<R> {
    pub fn new(runner: R, kubectl: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self { runner, kubectl: kubectl.into(), namespace: namespace.into() }
    }

    /// Fetch `name` and return the decoded value stored under `key`.
    pub fn get_secret(&self, name: &str, key: &str) -> Result<String> {
        debug!("Fetching secret {}/{} key {}", self.namespace, name, key);
        let args: Vec<String> = ["-n", self.namespace.as_str(), "get", "secret", name, "-o", "json"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let outcome = self.runner.run(&self.kubectl, &args, None);
        if !outcome.success {
            return Err(anyhow!(
                "Failed to get secret {}/{}: {}",
                name,
                key,
                outcome.output.trim_end()
            ));
        }

        decode_secret_value(&outcome.output, name, key)
    }
}

/// Pull `key` out of a `kubectl get secret -o json` payload and base64-decode it.
pub fn decode_secret_value(payload: &str, name: &str, key: &str) -> Result<String> {
    let json: serde_json::Value = serde_json::from_str(payload)
        .with_context(|| format!("Failed to parse secret {}/{}", name, key))?;

    let data = json
        .get("data")
        .and_then(|d| d.as_object())
        .ok_or_else(|| anyhow!("Secret {} has no data", name))?;

    let b64_val = data
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("Key {} not found in secret {}", key, name))?;

    // kubectl may wrap long values
    let b64_clean = b64_val.replace(['\n', '\r'], "");

    let bytes = general_purpose::STANDARD
        .decode(&b64_clean)
        .with_context(|| format!("Failed to decode base64 for {}/{}", name, key))?;

    String::from_utf8(bytes).with_context(|| format!("Secret {}/{} is not valid UTF-8", name, key))
}
