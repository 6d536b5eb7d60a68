//! Pipeline configuration
//!
//! Everything the pipeline needs is fixed before the generator runs: the
//! start and goal poses, how many samples to take, the velocity limit and
//! the arm geometry. Values come from defaults, an optional JSON file and
//! named parameter overrides, and are validated as a whole before use.

use crate::common::{ArmGeometry, JointState};
use crate::error::{ArmError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::path::Path;

/// Default number of samples, endpoints included
pub const DEFAULT_NUM_SAMPLES: usize = 21;
/// Default joint velocity limit [rad/s]
pub const DEFAULT_VELOCITY_LIMIT: f64 = 1.0;

/// Parameter keys accepted by [`PipelineConfig::configure`]
pub const PARAMETER_KEYS: [&str; 8] = [
    "num_samples",
    "velocity_limit",
    "link1_length",
    "link2_length",
    "start_theta1",
    "start_theta2",
    "goal_theta1",
    "goal_theta2",
];

/// Configuration of a single pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub start: JointState,
    pub goal: JointState,
    /// Samples in the trajectory, including both endpoints
    pub num_samples: usize,
    /// Maximum joint speed [rad/s]
    pub velocity_limit: f64,
    pub geometry: ArmGeometry,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            start: JointState::new(0.0, 0.0),
            goal: JointState::new(-PI, -PI / 6.0),
            num_samples: DEFAULT_NUM_SAMPLES,
            velocity_limit: DEFAULT_VELOCITY_LIMIT,
            geometry: ArmGeometry::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Missing top-level fields keep their defaults. Inside `geometry` a
    /// missing link keeps its default length; inside `start` and `goal` a
    /// missing angle or velocity reads as zero.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: PipelineConfig = serde_json::from_str(&text)?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    #[must_use]
    pub fn with_start(mut self, start: JointState) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub fn with_goal(mut self, goal: JointState) -> Self {
        self.goal = goal;
        self
    }

    #[must_use]
    pub fn with_num_samples(mut self, num_samples: usize) -> Self {
        self.num_samples = num_samples;
        self
    }

    #[must_use]
    pub fn with_velocity_limit(mut self, velocity_limit: f64) -> Self {
        self.velocity_limit = velocity_limit;
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: ArmGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Override fields from named parameters.
    ///
    /// Either every parameter is applied or, on error, none is.
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<()> {
        let mut updated = self.clone();
        updated.apply_params(params)?;
        *self = updated;
        Ok(())
    }

    fn apply_params(&mut self, params: &HashMap<String, f64>) -> Result<()> {
        if let Some(key) = params
            .keys()
            .find(|key| !PARAMETER_KEYS.contains(&key.as_str()))
        {
            return Err(ArmError::invalid_parameter(key.as_str(), "unknown parameter"));
        }

        if let Some(&num_samples) = params.get("num_samples") {
            if num_samples.fract() != 0.0 || num_samples < 2.0 {
                return Err(ArmError::invalid_parameter("num_samples", num_samples));
            }
            self.num_samples = num_samples as usize;
        }

        if let Some(&velocity_limit) = params.get("velocity_limit") {
            if velocity_limit <= 0.0 {
                return Err(ArmError::invalid_parameter("velocity_limit", velocity_limit));
            }
            self.velocity_limit = velocity_limit;
        }

        if let Some(&link1_length) = params.get("link1_length") {
            if link1_length <= 0.0 {
                return Err(ArmError::invalid_parameter("link1_length", link1_length));
            }
            self.geometry.link1_length = link1_length;
        }

        if let Some(&link2_length) = params.get("link2_length") {
            if link2_length <= 0.0 {
                return Err(ArmError::invalid_parameter("link2_length", link2_length));
            }
            self.geometry.link2_length = link2_length;
        }

        if let Some(&theta) = params.get("start_theta1") {
            self.start.theta1 = theta;
        }
        if let Some(&theta) = params.get("start_theta2") {
            self.start.theta2 = theta;
        }
        if let Some(&theta) = params.get("goal_theta1") {
            self.goal.theta1 = theta;
        }
        if let Some(&theta) = params.get("goal_theta2") {
            self.goal.theta2 = theta;
        }

        Ok(())
    }

    /// Check the whole configuration before anything runs
    pub fn validate(&self) -> Result<()> {
        if self.num_samples < 2 {
            return Err(ArmError::invalid_config(format!(
                "num_samples must be at least 2, got {}",
                self.num_samples
            )));
        }

        if !self.velocity_limit.is_finite() || self.velocity_limit <= 0.0 {
            return Err(ArmError::invalid_config(format!(
                "velocity_limit must be positive, got {}",
                self.velocity_limit
            )));
        }

        self.geometry.validate()?;

        if !self.start.angles_finite() {
            return Err(ArmError::invalid_input(format!(
                "start angles must be finite: {:?}",
                self.start
            )));
        }
        if !self.goal.angles_finite() {
            return Err(ArmError::invalid_input(format!(
                "goal angles must be finite: {:?}",
                self.goal
            )));
        }

        Ok(())
    }
}
