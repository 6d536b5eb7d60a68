//! Control module: joint-space trajectory generation and rate limiting
pub mod filters;
pub mod trajectory;

use self::filters::{apply_filter, JointFilter, VelocityLimitFilter};
use self::trajectory::TrajectoryGenerator;
use crate::common::{JointState, Trajectory};
use crate::error::Result;

/// Joint-space plan, before and after the rate filter
#[derive(Debug, Clone, PartialEq)]
pub struct JointPlan {
    pub raw: Trajectory,
    pub filtered: Trajectory,
}

/// Control stack for the arm
pub struct ControlStack {
    generator: TrajectoryGenerator,
    filter: Box<dyn JointFilter>,
}

impl ControlStack {
    /// Create a control stack that limits joint velocity to `velocity_limit`
    pub fn new(num_samples: usize, velocity_limit: f64) -> Result<Self> {
        Ok(ControlStack {
            generator: TrajectoryGenerator::new(num_samples)?,
            filter: Box::new(VelocityLimitFilter::new(velocity_limit)?),
        })
    }

    /// Create a control stack with a custom filter
    pub fn with_filter<F: JointFilter + 'static>(num_samples: usize, filter: F) -> Result<Self> {
        Ok(ControlStack {
            generator: TrajectoryGenerator::new(num_samples)?,
            filter: Box::new(filter),
        })
    }

    /// Replace the filter
    pub fn set_filter<F: JointFilter + 'static>(&mut self, filter: F) {
        self.filter = Box::new(filter);
    }

    pub fn generator(&self) -> &TrajectoryGenerator {
        &self.generator
    }

    /// Generate the trajectory from start to goal and filter it
    pub fn plan(&self, start: &JointState, goal: &JointState) -> JointPlan {
        let raw = self.generator.generate(start, goal);
        let filtered = apply_filter(raw.clone(), self.filter.as_ref());
        JointPlan { raw, filtered }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_keeps_raw_and_filtered() {
        let stack = ControlStack::new(3, 0.5).unwrap();
        assert_eq!(stack.generator().num_samples(), 3);
        let plan = stack.plan(&JointState::new(0.0, 0.0), &JointState::new(2.0, 0.2));

        assert_eq!(plan.raw.len(), 3);
        assert_eq!(plan.filtered.len(), 3);
        assert_eq!(plan.raw[1].dtheta1, 2.0);
        assert_eq!(plan.filtered[1].dtheta1, 0.5);
        assert_eq!(plan.filtered[1].theta1, plan.raw[1].theta1);
    }

    #[test]
    fn custom_filter_replaces_rate_limit() {
        let hold = |s: &JointState| s.with_velocity(0.0, 0.0);
        let mut stack = ControlStack::new(4, 1.0).unwrap();
        stack.set_filter(hold);

        let plan = stack.plan(&JointState::new(0.0, 0.0), &JointState::new(1.0, 1.0));
        assert!(plan.filtered.iter().all(|s| s.dtheta1 == 0.0 && s.dtheta2 == 0.0));
    }

    #[test]
    fn invalid_stack_is_rejected() {
        assert!(ControlStack::new(1, 1.0).is_err());
        assert!(ControlStack::new(5, 0.0).is_err());
    }
}
