// Homing support for SCARA arms
//
// Limit switches sit on the joints, but the controller tracks the step
// record in machine coordinates while homing. These helpers convert the
// record of homed axes back into joint steps.

use crate::{
    coord::{X_AXIS, Y_AXIS},
    kinematics::{JointPair, Planar, ScaraKinematics, Unreachable},
    settings::{AxisMask, AxisSettings, HomingSettings},
};

/// Joint-space bookkeeping for homing cycles.
#[derive(Debug, Clone, Copy)]
pub struct AxisLimits<const N: usize> {
    kinematics: ScaraKinematics,
    axes: [AxisSettings; N],
    homing: HomingSettings,
}

impl<const N: usize> AxisLimits<N> {
    pub fn new(kinematics: ScaraKinematics, axes: [AxisSettings; N], homing: HomingSettings) -> Self {
        const { assert!(N <= AxisMask::CAPACITY, "axis masks hold at most 8 axes") };
        Self {
            kinematics,
            axes,
            homing,
        }
    }

    /// Axes that move together when `idx` is homed.
    pub fn axis_mask(&self, idx: usize) -> AxisMask {
        if self.homing.link_joints && (idx == X_AXIS || idx == Y_AXIS) {
            AxisMask::bit(X_AXIS).with(Y_AXIS)
        } else {
            AxisMask::bit(idx)
        }
    }

    /// Joint angles for the planar position held in the step record.
    fn plane_joints(&self, position: &[i32; N]) -> Result<JointPair, Unreachable> {
        let xy = Planar {
            x: self.axes[X_AXIS].steps_to_units(position[X_AXIS]),
            y: self.axes[Y_AXIS].steps_to_units(position[Y_AXIS]),
        };
        self.kinematics.geometry().inverse(xy)
    }

    fn joint_steps(&self, idx: usize, q: &JointPair) -> i32 {
        let angle = if idx == X_AXIS { q.q1 } else { q.q2 };
        self.axes[idx].units_to_steps(angle)
    }

    /// Rewrite one axis of the step record after its switch trips.
    ///
    /// Driven axes get their joint angle in steps, other axes are zeroed.
    /// The record is untouched on error.
    pub fn set_target_position(
        &self,
        idx: usize,
        position: &mut [i32; N],
    ) -> Result<(), Unreachable> {
        tracing::debug!(axis = idx, "set homing target position");
        position[idx] = match idx {
            X_AXIS | Y_AXIS => {
                let q = self.plane_joints(position)?;
                self.joint_steps(idx, &q)
            }
            _ => 0,
        };
        Ok(())
    }

    /// Set machine positions after the homing cycle `cycle`.
    ///
    /// Both driven joints are re-solved from the record as it was on entry,
    /// with the pull-off added to the ones in the cycle when origin forcing
    /// is enabled. Every non-driven axis is zeroed. An empty cycle is a
    /// no-op; the record is untouched on error.
    pub fn set_machine_positions(
        &self,
        cycle: AxisMask,
        position: &mut [i32; N],
    ) -> Result<(), Unreachable> {
        tracing::debug!(cycle = cycle.bits(), "set homed machine positions");
        if cycle.is_empty() {
            return Ok(());
        }
        let q = self.plane_joints(position)?;

        for (idx, steps) in position.iter_mut().enumerate() {
            *steps = match idx {
                X_AXIS | Y_AXIS if cycle.contains(idx) => {
                    self.joint_steps(idx, &q) + self.homing.pulloff_steps(idx, &self.axes[idx])
                }
                X_AXIS | Y_AXIS => self.joint_steps(idx, &q),
                _ => 0,
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Elbow, Geometry, JointConvention};

    const AXES: [AxisSettings; 3] = [
        AxisSettings {
            steps_per_mm: 100.0,
            max_travel: -360.0,
        },
        AxisSettings {
            steps_per_mm: 100.0,
            max_travel: -360.0,
        },
        AxisSettings {
            steps_per_mm: 400.0,
            max_travel: -150.0,
        },
    ];

    fn kinematics() -> ScaraKinematics {
        ScaraKinematics::new(
            Geometry::new(500.0, 450.0, Elbow::Up, JointConvention::Absolute).unwrap(),
        )
    }

    fn limits(homing: HomingSettings) -> AxisLimits<3> {
        AxisLimits::new(kinematics(), AXES, homing)
    }

    fn expected_joints() -> JointPair {
        kinematics()
            .geometry()
            .inverse(Planar { x: 800.0, y: 0.0 })
            .unwrap()
    }

    #[test]
    fn axis_mask_is_identity_by_default() {
        let limits = limits(HomingSettings::default());
        assert_eq!(limits.axis_mask(0), AxisMask::bit(0));
        assert_eq!(limits.axis_mask(1), AxisMask::bit(1));
        assert_eq!(limits.axis_mask(2), AxisMask::bit(2));
    }

    #[test]
    fn axis_mask_links_driven_joints() {
        let limits = limits(HomingSettings {
            link_joints: true,
            ..HomingSettings::default()
        });
        assert_eq!(limits.axis_mask(0), AxisMask::from_bits(0b011));
        assert_eq!(limits.axis_mask(1), AxisMask::from_bits(0b011));
        assert_eq!(limits.axis_mask(2), AxisMask::bit(2));
    }

    #[test]
    fn target_position_updates_one_axis() {
        let limits = limits(HomingSettings::default());
        let q = expected_joints();

        let mut position = [80_000, 0, 1234];
        limits.set_target_position(X_AXIS, &mut position).unwrap();
        assert_eq!(position, [AXES[0].units_to_steps(q.q1), 0, 1234]);

        let mut position = [80_000, 0, 1234];
        limits.set_target_position(Y_AXIS, &mut position).unwrap();
        assert_eq!(position, [80_000, AXES[1].units_to_steps(q.q2), 1234]);

        let mut position = [80_000, 0, 1234];
        limits.set_target_position(2, &mut position).unwrap();
        assert_eq!(position, [80_000, 0, 0]);
    }

    #[test]
    fn target_position_is_idempotent_for_same_input() {
        let limits = limits(HomingSettings::default());
        let mut a = [80_000, 0, 5];
        let mut b = [80_000, 0, 5];
        limits.set_target_position(Y_AXIS, &mut a).unwrap();
        limits.set_target_position(Y_AXIS, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn machine_positions_apply_pulloff() {
        let limits = limits(HomingSettings {
            pulloff: 2.0,
            force_set_origin: true,
            dir_mask: AxisMask::bit(Y_AXIS),
            link_joints: false,
        });
        let q = expected_joints();

        let mut position = [80_000, 0, 999];
        limits
            .set_machine_positions(AxisMask::from_bits(0b111), &mut position)
            .unwrap();
        assert_eq!(
            position,
            [
                AXES[0].units_to_steps(q.q1) - 200,
                AXES[1].units_to_steps(q.q2) + (-358 * 100),
                0,
            ]
        );
    }

    #[test]
    fn machine_positions_zero_every_non_driven_axis() {
        let limits = limits(HomingSettings {
            pulloff: 2.0,
            force_set_origin: true,
            ..HomingSettings::default()
        });
        let q = expected_joints();
        let joints = [AXES[0].units_to_steps(q.q1), AXES[1].units_to_steps(q.q2)];

        let mut position = [80_000, 0, 999];
        limits
            .set_machine_positions(AxisMask::bit(X_AXIS), &mut position)
            .unwrap();
        assert_eq!(position, [joints[0] - 200, joints[1], 0]);

        let mut position = [80_000, 0, 999];
        limits
            .set_machine_positions(AxisMask::bit(2), &mut position)
            .unwrap();
        assert_eq!(position, [joints[0], joints[1], 0]);
    }

    #[test]
    fn empty_cycle_leaves_record_alone() {
        let limits = limits(HomingSettings::default());
        let mut position = [80_000, 0, 999];
        limits
            .set_machine_positions(AxisMask::new(), &mut position)
            .unwrap();
        assert_eq!(position, [80_000, 0, 999]);
    }

    #[test]
    fn unreachable_leaves_record_untouched() {
        let limits = limits(HomingSettings::default());
        let mut position = [100_000, 0, 7];
        assert!(
            limits
                .set_machine_positions(AxisMask::from_bits(0b111), &mut position)
                .is_err()
        );
        assert!(limits.set_target_position(X_AXIS, &mut position).is_err());
        assert_eq!(position, [100_000, 0, 7]);
    }
}
