//! Common types shared by every stage of the arm pipeline

use crate::error::{ArmError, Result};
use nalgebra::{Point2, Vector2};
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Default length of the first link [m]
pub const DEFAULT_LINK1_LENGTH: f64 = 0.5;
/// Default length of the second link [m]
pub const DEFAULT_LINK2_LENGTH: f64 = 0.3;

/// Sign of a number, with zero counted as positive.
pub fn sign<T: Float>(x: T) -> T {
    if x < T::zero() {
        -T::one()
    } else {
        T::one()
    }
}

/// One sample of the arm configuration and its commanded joint velocities
///
/// Fields missing from serialized input read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointState {
    /// Joint 1 angle [rad]
    pub theta1: f64,
    /// Joint 2 angle [rad]
    pub theta2: f64,
    /// Joint 1 velocity [rad/s]
    pub dtheta1: f64,
    /// Joint 2 velocity [rad/s]
    pub dtheta2: f64,
}

impl JointState {
    /// Create a joint state at rest
    pub const fn new(theta1: f64, theta2: f64) -> Self {
        JointState {
            theta1,
            theta2,
            dtheta1: 0.0,
            dtheta2: 0.0,
        }
    }

    /// Return a copy carrying the given joint velocities
    #[must_use]
    pub const fn with_velocity(self, dtheta1: f64, dtheta2: f64) -> Self {
        JointState {
            dtheta1,
            dtheta2,
            ..self
        }
    }

    /// True when both joint angles are finite
    pub fn angles_finite(&self) -> bool {
        self.theta1.is_finite() && self.theta2.is_finite()
    }
}

/// Cartesian position of the arm's tip in the base frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EndEffectorPose {
    /// [m]
    pub x: f64,
    /// [m]
    pub y: f64,
}

impl EndEffectorPose {
    pub const fn new(x: f64, y: f64) -> Self {
        EndEffectorPose { x, y }
    }

    /// Distance from the arm base (the first joint) to the tip
    pub fn distance_from_base(&self) -> f64 {
        Vector2::new(self.x, self.y).norm()
    }
}

impl From<EndEffectorPose> for Point2<f64> {
    fn from(pose: EndEffectorPose) -> Self {
        Point2::new(pose.x, pose.y)
    }
}

impl From<Point2<f64>> for EndEffectorPose {
    fn from(point: Point2<f64>) -> Self {
        EndEffectorPose::new(point.x, point.y)
    }
}

/// Link lengths of the two-link arm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmGeometry {
    /// Length of link 1 [m]
    pub link1_length: f64,
    /// Length of link 2 [m]
    pub link2_length: f64,
}

impl Default for ArmGeometry {
    fn default() -> Self {
        ArmGeometry {
            link1_length: DEFAULT_LINK1_LENGTH,
            link2_length: DEFAULT_LINK2_LENGTH,
        }
    }
}

impl ArmGeometry {
    /// Create a validated geometry
    pub fn new(link1_length: f64, link2_length: f64) -> Result<Self> {
        let geometry = ArmGeometry {
            link1_length,
            link2_length,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Both links must be strictly positive and finite
    pub fn validate(&self) -> Result<()> {
        for (name, length) in [
            ("link1_length", self.link1_length),
            ("link2_length", self.link2_length),
        ] {
            if !length.is_finite() || length <= 0.0 {
                return Err(ArmError::invalid_config(format!(
                    "{} must be positive, got {}",
                    name, length
                )));
            }
        }
        Ok(())
    }

    /// Inner and outer radius of the reachable annulus
    pub fn reach_envelope(&self) -> (f64, f64) {
        (
            (self.link1_length - self.link2_length).abs(),
            self.link1_length + self.link2_length,
        )
    }
}

/// Ordered joint-space samples from start (index 0) to goal (last index)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    samples: Vec<JointState>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&JointState> {
        self.samples.get(index)
    }

    pub fn first(&self) -> Option<&JointState> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&JointState> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JointState> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[JointState] {
        &self.samples
    }

    /// Hand back the sample buffer
    pub fn into_inner(self) -> Vec<JointState> {
        self.samples
    }
}

impl From<Vec<JointState>> for Trajectory {
    fn from(samples: Vec<JointState>) -> Self {
        Trajectory { samples }
    }
}

impl FromIterator<JointState> for Trajectory {
    fn from_iter<I: IntoIterator<Item = JointState>>(iter: I) -> Self {
        Trajectory {
            samples: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for Trajectory {
    type Output = JointState;

    fn index(&self, index: usize) -> &JointState {
        &self.samples[index]
    }
}

impl IntoIterator for Trajectory {
    type Item = JointState;
    type IntoIter = std::vec::IntoIter<JointState>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a JointState;
    type IntoIter = std::slice::Iter<'a, JointState>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
