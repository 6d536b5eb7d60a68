//! Text and JSON reporting of a pipeline run

use crate::common::{EndEffectorPose, JointState, Trajectory};
use crate::config::PipelineConfig;
use crate::error::{ArmError, Result};
use serde::Serialize;
use std::fmt;

impl fmt::Display for JointState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "θ1 = {:.4} rad | θ2 = {:.4} rad | dθ1 = {:.4} rad/s | dθ2 = {:.4} rad/s",
            self.theta1, self.theta2, self.dtheta1, self.dtheta2
        )
    }
}

impl fmt::Display for EndEffectorPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x = {:.4} m | y = {:.4} m", self.x, self.y)
    }
}

/// Every `stride`-th item with its original index, starting at index 0
pub fn decimate<T>(items: &[T], stride: usize) -> Result<impl Iterator<Item = (usize, &T)>> {
    if stride == 0 {
        return Err(ArmError::invalid_parameter("decimation stride", stride));
    }
    Ok(items.iter().enumerate().step_by(stride))
}

/// Everything a run produced, indexable by trajectory sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub config: PipelineConfig,
    /// Trajectory as generated, before rate limiting
    pub raw: Trajectory,
    /// Trajectory after rate limiting
    pub filtered: Trajectory,
    /// End-effector pose of each filtered sample
    pub poses: Vec<EndEffectorPose>,
}

impl PipelineReport {
    /// Human-readable report, showing every `stride`-th joint sample
    pub fn text(&self, stride: usize) -> Result<TextReport<'_>> {
        if stride == 0 {
            return Err(ArmError::invalid_parameter("decimation stride", stride));
        }
        Ok(TextReport {
            report: self,
            stride,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Console rendering of a [`PipelineReport`]
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    report: &'a PipelineReport,
    stride: usize,
}

impl TextReport<'_> {
    fn write_states(&self, f: &mut fmt::Formatter<'_>, traj: &Trajectory) -> fmt::Result {
        let states = decimate(traj.as_slice(), self.stride).map_err(|_| fmt::Error)?;
        for (i, state) in states {
            writeln!(f, "[{}] {}", i, state)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        writeln!(f, "=== Robot Kinematics & Control ===")?;
        writeln!(f)?;
        writeln!(f, "Start state:")?;
        writeln!(f, "{}", report.config.start)?;
        writeln!(f, "Goal state:")?;
        writeln!(f, "{}", report.config.goal)?;
        writeln!(f)?;

        writeln!(f, "Trajectory points: {}", report.raw.len())?;
        writeln!(f, "Before rate filter")?;
        self.write_states(f, &report.raw)?;
        writeln!(f, "After rate filter")?;
        self.write_states(f, &report.filtered)?;

        writeln!(f, "End-Effector Trajectory (all points)")?;
        for (i, pose) in report.poses.iter().enumerate() {
            writeln!(f, "[{}] {}", i, pose)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_report() -> PipelineReport {
        let states: Vec<JointState> = (0..4)
            .map(|i| JointState::new(i as f64 * 0.1, 0.0).with_velocity(0.3, 0.0))
            .collect();
        PipelineReport {
            config: PipelineConfig::default().with_num_samples(4),
            raw: states.clone().into(),
            filtered: states.into(),
            poses: vec![EndEffectorPose::new(0.8, 0.0); 4],
        }
    }

    #[test]
    fn joint_state_display() {
        let state = JointState::new(-std::f64::consts::PI, 0.5).with_velocity(1.0, -0.25);
        assert_eq!(
            state.to_string(),
            "θ1 = -3.1416 rad | θ2 = 0.5000 rad | dθ1 = 1.0000 rad/s | dθ2 = -0.2500 rad/s"
        );
    }

    #[test]
    fn pose_display() {
        assert_eq!(
            EndEffectorPose::new(0.8, -0.01234).to_string(),
            "x = 0.8000 m | y = -0.0123 m"
        );
    }

    #[test]
    fn decimate_keeps_first_and_every_nth() {
        let items = [10, 11, 12, 13, 14, 15, 16];
        let picked: Vec<_> = decimate(&items, 3).unwrap().collect();
        assert_eq!(picked, vec![(0, &10), (3, &13), (6, &16)]);

        let all: Vec<_> = decimate(&items, 1).unwrap().map(|(i, _)| i).collect();
        assert_eq!(all, (0..7).collect::<Vec<_>>());

        assert!(decimate(&items, 0).is_err());
    }

    #[test]
    fn text_report_sections() {
        let report = tiny_report();
        let text = report.text(2).unwrap().to_string();

        assert!(text.starts_with("=== Robot Kinematics & Control ===\n"));
        assert!(text.contains("Trajectory points: 4\n"));
        assert!(text.contains("[2] θ1 = 0.2000 rad"));
        assert!(!text.contains("[1] θ1"));
        assert!(text.contains("[3] x = 0.8000 m | y = 0.0000 m"));

        let before = text.find("Before rate filter").unwrap();
        let after = text.find("After rate filter").unwrap();
        let poses = text.find("End-Effector Trajectory (all points)").unwrap();
        assert!(before < after && after < poses);
    }

    #[test]
    fn zero_stride_is_rejected() {
        assert!(tiny_report().text(0).is_err());
    }

    #[test]
    fn json_report_has_all_outputs() {
        let text = tiny_report().to_json().unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["raw"].as_array().unwrap().len(), 4);
        assert_eq!(json["filtered"][1]["dtheta1"], 0.3);
        assert_eq!(json["poses"][0]["x"], 0.8);
        assert_eq!(json["config"]["num_samples"], 4);
    }
}
