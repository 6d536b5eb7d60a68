//! Trajectory generation module

use crate::common::{JointState, Trajectory};
use crate::error::{ArmError, Result};

/// Interpolation fraction of sample `index` in a trajectory of `num_samples`.
///
/// Clamped to `[0, 1]`. A trajectory of fewer than 2 samples has no interior,
/// so its only index maps to 0 and anything past it to 1.
pub fn alpha(index: usize, num_samples: usize) -> f64 {
    let alpha = index as f64 / num_samples.saturating_sub(1).max(1) as f64;
    alpha.clamp(0.0, 1.0)
}

/// Linearly interpolate between two joint states.
///
/// Angles follow the straight line in joint space. Both velocity fields carry
/// the total displacement still to be covered by the whole move; the rate
/// filter later limits it to the admissible joint speed.
pub fn interpolate_linear(start: &JointState, goal: &JointState, alpha: f64) -> JointState {
    let alpha = alpha.clamp(0.0, 1.0);

    let d_theta1 = goal.theta1 - start.theta1;
    let d_theta2 = goal.theta2 - start.theta2;

    JointState {
        theta1: start.theta1 + alpha * d_theta1,
        theta2: start.theta2 + alpha * d_theta2,
        dtheta1: d_theta1,
        dtheta2: d_theta2,
    }
}

/// A trajectory generator for the arm
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryGenerator {
    num_samples: usize,
}

impl TrajectoryGenerator {
    /// Create a new trajectory generator producing `num_samples` points
    pub fn new(num_samples: usize) -> Result<Self> {
        if num_samples < 2 {
            return Err(ArmError::invalid_config(format!(
                "num_samples must be at least 2, got {}",
                num_samples
            )));
        }
        Ok(TrajectoryGenerator { num_samples })
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Generate a trajectory from start to goal
    pub fn generate(&self, start: &JointState, goal: &JointState) -> Trajectory {
        let last = self.num_samples - 1;
        let trajectory: Trajectory = (0..self.num_samples)
            .map(|i| match i {
                // Pin the endpoints so rounding in alpha can't move them
                0 => JointState {
                    theta1: start.theta1,
                    theta2: start.theta2,
                    ..interpolate_linear(start, goal, 0.0)
                },
                i if i == last => JointState {
                    theta1: goal.theta1,
                    theta2: goal.theta2,
                    ..interpolate_linear(start, goal, 1.0)
                },
                i => interpolate_linear(start, goal, alpha(i, self.num_samples)),
            })
            .collect();

        log::debug!("Generated trajectory with {} samples", trajectory.len());
        trajectory
    }
}
