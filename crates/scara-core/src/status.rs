//! Values the status report shows for a SCARA machine.
//!
//! Only numbers live here; the reporting side owns the text framing.

use crate::{
    coord::{X_AXIS, Y_AXIS},
    kinematics::ScaraKinematics,
    settings::AxisSettings,
};
use serde::Serialize;

pub const KINEMATICS_NAME: &str = "scara";
pub const KINEMATICS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Link lengths, reported once with the build options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RobotInfo {
    pub kinematics: &'static str,
    pub version: &'static str,
    pub l1: f64,
    pub l2: f64,
}

/// Current joint angles in degrees, reported with every realtime report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointStatus {
    pub q1: f64,
    pub q2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusReport {
    pub robot: RobotInfo,
    pub joints: JointStatus,
}

impl ScaraKinematics {
    pub fn robot_info(&self) -> RobotInfo {
        RobotInfo {
            kinematics: KINEMATICS_NAME,
            version: KINEMATICS_VERSION,
            l1: self.geometry().l1(),
            l2: self.geometry().l2(),
        }
    }

    pub fn joint_status<const N: usize>(
        &self,
        steps: &[i32; N],
        axes: &[AxisSettings; N],
    ) -> JointStatus {
        JointStatus {
            q1: axes[X_AXIS].steps_to_units(steps[X_AXIS]),
            q2: axes[Y_AXIS].steps_to_units(steps[Y_AXIS]),
        }
    }

    pub fn status_report<const N: usize>(
        &self,
        steps: &[i32; N],
        axes: &[AxisSettings; N],
    ) -> StatusReport {
        StatusReport {
            robot: self.robot_info(),
            joints: self.joint_status(steps, axes),
        }
    }
}
