//! Filters applied sample-by-sample to a joint trajectory

use crate::common::{sign, JointState, Trajectory};
use crate::error::{ArmError, Result};

/// A pure transform of one joint state
pub trait JointFilter: Send + Sync {
    /// Filter the input state
    fn filter(&self, input: &JointState) -> JointState;
}

impl<F> JointFilter for F
where
    F: Fn(&JointState) -> JointState + Send + Sync,
{
    fn filter(&self, input: &JointState) -> JointState {
        self(input)
    }
}

/// Clamps each joint velocity to `[-limit, limit]`, keeping its sign
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityLimitFilter {
    limit: f64,
}

impl VelocityLimitFilter {
    /// Create a new velocity limit filter
    pub fn new(limit: f64) -> Result<Self> {
        if !limit.is_finite() || limit <= 0.0 {
            return Err(ArmError::invalid_config(format!(
                "velocity_limit must be positive, got {}",
                limit
            )));
        }
        Ok(VelocityLimitFilter { limit })
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    fn clamp(&self, rate: f64) -> f64 {
        sign(rate) * rate.abs().min(self.limit)
    }
}

impl JointFilter for VelocityLimitFilter {
    fn filter(&self, input: &JointState) -> JointState {
        JointState {
            dtheta1: self.clamp(input.dtheta1),
            dtheta2: self.clamp(input.dtheta2),
            ..*input
        }
    }
}

/// Apply a filter to every sample of a trajectory, keeping the sample order
pub fn apply_filter<F: JointFilter + ?Sized>(trajectory: Trajectory, filter: &F) -> Trajectory {
    let samples = trajectory.into_inner();

    #[cfg(feature = "parallel")]
    let filtered: Trajectory = {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
        samples
            .par_iter()
            .map(|state| filter.filter(state))
            .collect::<Vec<_>>()
            .into()
    };

    #[cfg(not(feature = "parallel"))]
    let filtered: Trajectory = samples.iter().map(|state| filter.filter(state)).collect();

    log::trace!("Filtered {} samples", filtered.len());
    filtered
}
