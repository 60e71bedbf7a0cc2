//! Engine configuration.

use serde::{Deserialize, Serialize};
use crate::error::Result;

/// Holds raw engine config parsed from YAML file.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
struct RawEngineConfig {
    pub max_nodes_per_cluster: Option<i64>,
    pub random_seed: Option<u64>,
}

/// Represents engine configuration.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound for the size of any cluster.
    pub max_nodes_per_cluster: i64,
    /// Seed for RANDOM victim selection. Selection is not reproducible without it.
    pub random_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_nodes_per_cluster: 1000,
            random_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let raw: RawEngineConfig = serde_yaml::from_str(yaml)?;
        let default = Self::default();

        Ok(Self {
            max_nodes_per_cluster: raw.max_nodes_per_cluster.unwrap_or(default.max_nodes_per_cluster),
            random_seed: raw.random_seed,
        })
    }

    pub fn from_file(file_name: &str) -> Result<Self> {
        Self::from_yaml_str(&std::fs::read_to_string(file_name)?)
    }
}
