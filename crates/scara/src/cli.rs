use crate::config::{AXES, Config};
use anyhow::{Context, Result};
use scara_core::{
    Elbow, Geometry, JointConvention, LineSegmenter, ScaraKinematics, limits::AxisLimits,
    settings::AxisSettings,
};
use serde::Serialize;

pub mod machine;
pub mod segment;
pub mod transform;

/// Everything the subcommands need, built once from the config.
pub struct Machine {
    pub kinematics: ScaraKinematics,
    pub segmenter: LineSegmenter,
    pub limits: AxisLimits<AXES>,
    pub axes: [AxisSettings; AXES],
}

impl Machine {
    pub fn new(config: &Config) -> Result<Self> {
        let robot = &config.robot;
        let geometry = Geometry::new(robot.l1, robot.l2, robot.elbow, robot.joint_angles)
            .context("invalid robot geometry")?;
        let kinematics = ScaraKinematics::new(geometry);
        let axes = config.axes()?;

        tracing::debug!(
            l1 = robot.l1,
            l2 = robot.l2,
            elbow = ?robot.elbow,
            joint_angles = ?robot.joint_angles,
            "machine configured"
        );

        Ok(Self {
            kinematics,
            segmenter: LineSegmenter::new(kinematics)
                .with_max_segment_length(robot.max_segment_length),
            limits: AxisLimits::new(kinematics, axes, config.homing),
            axes,
        })
    }
}

pub fn parse_elbow(s: &str) -> Result<Elbow, String> {
    Elbow::parse(s).ok_or_else(|| format!("unknown elbow configuration `{s}`"))
}

pub fn parse_convention(s: &str) -> Result<JointConvention, String> {
    JointConvention::parse(s).ok_or_else(|| format!("unknown joint angle convention `{s}`"))
}

/// Collect a full axis vector from the command line.
pub fn axis_values<T: Copy>(values: &[T]) -> Result<[T; AXES]> {
    values
        .try_into()
        .with_context(|| format!("expected {AXES} values, got {}", values.len()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let line = serde_json::to_string(value).context("failed to render JSON")?;
    println!("{line}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_report_json() {
        let machine = Machine::new(&Config::default()).unwrap();
        let steps = ScaraKinematics::parked_position(&machine.axes);
        assert_eq!(steps, [0, -22500, 0]);

        let report = machine.kinematics.status_report(&steps, &machine.axes);
        insta::assert_snapshot!(serde_json::to_string_pretty(&report).unwrap(), @r#"
{
  "robot": {
    "kinematics": "scara",
    "version": "0.1.0",
    "l1": 500.0,
    "l2": 450.0
  },
  "joints": {
    "q1": 0.0,
    "q2": -90.0
  }
}
"#);
    }

    #[test]
    fn machine_rejects_bad_geometry() {
        let mut config = Config::default();
        config.robot.l2 = 0.0;
        let err = Machine::new(&config).err().unwrap();
        assert_eq!(err.to_string(), "invalid robot geometry");
    }

    #[test]
    fn machine_uses_configured_segment_length() {
        let mut config = Config::default();
        config.robot.max_segment_length = 5.0;
        let machine = Machine::new(&config).unwrap();
        assert_eq!(machine.segmenter.max_segment_length(), 5.0);
    }

    #[test]
    fn axis_values_checks_length() {
        assert_eq!(axis_values(&[1.0, 2.0, 3.0]).unwrap(), [1.0, 2.0, 3.0]);
        let err = axis_values(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err.to_string(), "expected 3 values, got 2");
    }

    #[test]
    fn branch_arguments() {
        assert_eq!(parse_elbow("down"), Ok(Elbow::Down));
        assert!(parse_elbow("left").is_err());
        assert_eq!(parse_convention("relative"), Ok(JointConvention::Relative));
        assert!(parse_convention("polar").is_err());
    }
}
