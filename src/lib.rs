pub mod common;
pub mod config;
pub mod control;
pub mod error;
pub mod kinematics;
pub mod report;

pub use crate::common::{ArmGeometry, EndEffectorPose, JointState, Trajectory};
pub use crate::config::PipelineConfig;
pub use crate::error::{ArmError, Result};
pub use crate::report::PipelineReport;

use crate::control::filters::JointFilter;
use crate::control::ControlStack;
use crate::kinematics::ForwardKinematics;

/// Trajectory pipeline for a planar two-link arm
///
/// Generates a joint-space trajectory, rate-limits it and maps every sample
/// to an end-effector position. Each stage consumes the whole output of the
/// previous one.
pub struct ArmPipeline {
    config: PipelineConfig,
    control: ControlStack,
    kinematics: ForwardKinematics,
}

impl ArmPipeline {
    /// Create a pipeline from a validated configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(ArmPipeline {
            control: ControlStack::new(config.num_samples, config.velocity_limit)?,
            kinematics: ForwardKinematics::new(config.geometry)?,
            config,
        })
    }

    /// Create a pipeline that uses `filter` instead of the velocity limit
    pub fn with_filter<F: JointFilter + 'static>(
        config: PipelineConfig,
        filter: F,
    ) -> Result<Self> {
        config.validate()?;
        Ok(ArmPipeline {
            control: ControlStack::with_filter(config.num_samples, filter)?,
            kinematics: ForwardKinematics::new(config.geometry)?,
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run all stages once
    pub fn run(&self) -> PipelineReport {
        log::info!(
            "Running arm pipeline: {} samples, velocity limit {} rad/s",
            self.config.num_samples,
            self.config.velocity_limit
        );

        let plan = self.control.plan(&self.config.start, &self.config.goal);
        let poses = self.kinematics.solve_all(&plan.filtered);

        let clamped = plan
            .raw
            .iter()
            .zip(plan.filtered.iter())
            .filter(|(raw, filtered)| raw != filtered)
            .count();
        log::debug!("Rate filter changed {} of {} samples", clamped, plan.raw.len());
        log::info!("Arm pipeline finished");

        PipelineReport {
            config: self.config.clone(),
            raw: plan.raw,
            filtered: plan.filtered,
            poses,
        }
    }
}
