//! Error types of the policy engine.

use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A single policy property failed validation.
    #[error("Invalid value '{value}' specified for '{name}'")]
    InvalidParameter { name: String, value: String },

    /// The policy specification as a whole is malformed.
    #[error("{0}")]
    SpecValidationFailed(String),

    #[error("The cluster ({cluster}) could not be found.")]
    ClusterNotFound { cluster: String },

    #[error("The action ({action}) could not be found.")]
    ActionNotFound { action: String },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_parameter(name: &str, value: impl ToString) -> Self {
        Error::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
