//! Error types for the arm pipeline

use thiserror::Error;

/// Errors raised while configuring or running the pipeline.
#[derive(Debug, Error)]
pub enum ArmError {
    /// The configuration cannot produce a trajectory.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// A start or goal state is not usable (non-finite angle).
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What is wrong with the input.
        reason: String,
    },

    /// A named parameter was unknown or carried an unusable value.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter {
        /// Parameter key.
        name: String,
        /// Offending value, rendered for display.
        value: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    ConfigFile(#[from] std::io::Error),

    /// The configuration file is not valid JSON for a pipeline config.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl ArmError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
        }
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration { .. } | Self::InvalidParameter { .. }
        )
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ArmError>;
