use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the chart version inside a deployment's config.
pub const CHART_VERSION_KEY: &str = "chartVersion";

/// Helm values for one deployment.
///
/// The YAML handed to helm lists keys in sorted order at every level, so the
/// document does not depend on how the database returned the config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartValues(Map<String, Value>);

impl ChartValues {
    /// Parse a JSON document; anything but an object is rejected.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("Deployment config is not valid JSON")?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(anyhow!("Deployment config must be a JSON object, got {}", kind(&other))),
        }
    }

    /// The required `chartVersion` entry, passed to helm verbatim.
    pub fn chart_version(&self) -> Result<&str> {
        match self.0.get(CHART_VERSION_KEY) {
            Some(Value::String(v)) => Ok(v),
            Some(other) => Err(anyhow!("{} must be a string, got {}", CHART_VERSION_KEY, kind(other))),
            None => Err(anyhow!("Deployment config has no {}", CHART_VERSION_KEY)),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.sorted()).context("Failed to serialize chart values to YAML")
    }

    fn sorted(&self) -> Self {
        Self(sort_map(&self.0))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn sort_map(map: &Map<String, Value>) -> Map<String, Value> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.into_iter().map(|(k, v)| (k.clone(), sort_value(v))).collect()
}

fn sort_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sort_map(map)),
        Value::Array(items) => Value::Array(items.iter().map(sort_value).collect()),
        other => other.clone(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
