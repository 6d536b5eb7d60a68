//! Forward kinematics of the planar two-link arm
//!
//! The tip position is the sum of the two link vectors, the second one
//! rotated by the accumulated angle of both joints:
//!
//! ```text
//! x = L1 cos(θ1) + L2 cos(θ1 + θ2)
//! y = L1 sin(θ1) + L2 sin(θ1 + θ2)
//! ```
//!
//! Every finite pair of angles maps onto the annulus between `|L1 - L2|`
//! and `L1 + L2` around the base.

use crate::common::{ArmGeometry, EndEffectorPose, JointState, Trajectory};
use crate::error::Result;

/// Tip position of the arm for one joint configuration
pub fn forward_kinematics(state: &JointState, geometry: &ArmGeometry) -> EndEffectorPose {
    let ArmGeometry {
        link1_length: l1,
        link2_length: l2,
    } = *geometry;
    let elbow = state.theta1 + state.theta2;

    EndEffectorPose {
        x: l1 * state.theta1.cos() + l2 * elbow.cos(),
        y: l1 * state.theta1.sin() + l2 * elbow.sin(),
    }
}

/// Forward kinematics solver bound to one arm geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardKinematics {
    geometry: ArmGeometry,
}

impl ForwardKinematics {
    pub fn new(geometry: ArmGeometry) -> Result<Self> {
        geometry.validate()?;
        Ok(ForwardKinematics { geometry })
    }

    pub fn geometry(&self) -> &ArmGeometry {
        &self.geometry
    }

    pub fn solve(&self, state: &JointState) -> EndEffectorPose {
        forward_kinematics(state, &self.geometry)
    }

    /// Solve every sample, index for index
    pub fn solve_all(&self, trajectory: &Trajectory) -> Vec<EndEffectorPose> {
        #[cfg(feature = "parallel")]
        let poses: Vec<EndEffectorPose> = {
            use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
            trajectory
                .as_slice()
                .par_iter()
                .map(|state| self.solve(state))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let poses: Vec<EndEffectorPose> =
            trajectory.iter().map(|state| self.solve(state)).collect();

        log::debug!("Solved {} end-effector poses", poses.len());
        poses
    }

    /// Whether `pose` lies inside the reach envelope, up to `tolerance`
    pub fn within_reach(&self, pose: &EndEffectorPose, tolerance: f64) -> bool {
        let (inner, outer) = self.geometry.reach_envelope();
        let r = pose.distance_from_base();
        r >= inner - tolerance && r <= outer + tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn solver() -> ForwardKinematics {
        ForwardKinematics::new(ArmGeometry::default()).unwrap()
    }

    #[test]
    fn straight_arm_points_along_x() {
        let pose = solver().solve(&JointState::new(0.0, 0.0));
        assert_eq!(pose.x, 0.8);
        assert_eq!(pose.y, 0.0);
    }

    #[test]
    fn elbow_bent_at_right_angle() {
        let pose = solver().solve(&JointState::new(0.0, FRAC_PI_2));
        assert_relative_eq!(pose.x, 0.5);
        assert_relative_eq!(pose.y, 0.3);

        let pose = solver().solve(&JointState::new(FRAC_PI_2, 0.0));
        assert_abs_diff_eq!(pose.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(pose.y, 0.8);
    }

    #[test]
    fn folded_arm_hits_inner_radius() {
        let pose = solver().solve(&JointState::new(0.3, PI));
        assert_relative_eq!(pose.distance_from_base(), 0.2, epsilon = 1e-12);
        assert!(solver().within_reach(&pose, 1e-9));
    }

    #[test]
    fn angles_wrap() {
        let a = solver().solve(&JointState::new(0.4, -1.1));
        let b = solver().solve(&JointState::new(0.4 + 2.0 * PI, -1.1 - 4.0 * PI));
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-12);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-12);
    }

    #[test]
    fn velocities_do_not_move_the_tip() {
        let still = solver().solve(&JointState::new(0.7, 0.2));
        let moving = solver().solve(&JointState::new(0.7, 0.2).with_velocity(5.0, -5.0));
        assert_eq!(still, moving);
    }

    #[test]
    fn solve_all_matches_indices() {
        let traj: Trajectory = (0..8).map(|i| JointState::new(i as f64 * 0.3, -0.2)).collect();
        let fk = solver();
        let poses = fk.solve_all(&traj);

        assert_eq!(poses.len(), traj.len());
        for (state, pose) in traj.iter().zip(&poses) {
            assert_eq!(*pose, fk.solve(state));
        }
    }

    #[test]
    fn rejects_bad_geometry() {
        let geometry = ArmGeometry {
            link1_length: 0.5,
            link2_length: 0.0,
        };
        assert!(ForwardKinematics::new(geometry).is_err());

        let geometry = ArmGeometry::new(1.2, 0.4).unwrap();
        let fk = ForwardKinematics::new(geometry).unwrap();
        assert_eq!(*fk.geometry(), geometry);
    }

    #[test]
    fn outside_envelope_is_detected() {
        let fk = solver();
        assert!(!fk.within_reach(&EndEffectorPose::new(1.0, 0.0), 1e-9));
        assert!(!fk.within_reach(&EndEffectorPose::new(0.1, 0.0), 1e-9));
        assert!(fk.within_reach(&EndEffectorPose::new(0.0, 0.5), 1e-9));
    }
}
