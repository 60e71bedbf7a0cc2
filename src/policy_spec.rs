//! Policy specifications and their validation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use crate::error::{Error, Result};

/// Policy specification as submitted by the operator.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySpec {
    #[serde(rename = "type")]
    pub policy_type: String,
    #[serde(deserialize_with = "version_string")]
    pub version: String,
    #[serde(default)]
    pub properties: Mapping,
}

impl PolicySpec {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(file_name: &str) -> Result<Self> {
        Self::from_yaml_str(&std::fs::read_to_string(file_name)?)
    }

    /// Fails unless the spec declares the given type and version.
    pub fn check_type(&self, policy_type: &str, version: &str) -> Result<()> {
        if self.policy_type != policy_type || self.version != version {
            return Err(Error::SpecValidationFailed(format!(
                "Policy type '{}-{}' does not match '{}-{}'",
                self.policy_type, self.version, policy_type, version)));
        }
        Ok(())
    }

    /// Rejects properties outside of `allowed`.
    pub fn check_keys(&self, allowed: &[&str]) -> Result<()> {
        for key in self.properties.keys() {
            let key = key.as_str().unwrap_or_default();
            if !allowed.contains(&key) {
                return Err(Error::SpecValidationFailed(format!("Unrecognizable spec item '{}'", key)));
            }
        }
        Ok(())
    }

    /// Typed value of property `name`, `None` when it is absent.
    pub fn property<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.properties.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_yaml::from_value(value.clone())
                .map(Some)
                .map_err(|_| Error::invalid_parameter(name, render(value))),
        }
    }
}

/// Accepts `version: 1.0` as well as `version: "1.0"`.
fn version_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(render(&Value::deserialize(deserializer)?))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
