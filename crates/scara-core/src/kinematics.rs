// SCARA kinematics

use crate::{
    coord::{Cartesian, Joints, X_AXIS, Y_AXIS},
    geometry::{Elbow, Geometry, JointConvention},
    settings::AxisSettings,
};
use thiserror::Error;

/// Pose of the arm in the driven plane, mm.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Planar {
    pub x: f64,
    pub y: f64,
}

/// Driven joint angles, degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JointPair {
    pub q1: f64,
    pub q2: f64,
}

/// The requested point lies outside the disc the arm can sweep.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("target ({x:.4}, {y:.4}) is outside the arm reach of {reach} mm")]
pub struct Unreachable {
    pub x: f64,
    pub y: f64,
    pub reach: f64,
}

impl Geometry {
    /// Forward kinematics: joint angles to planar position.
    ///
    /// A relative `q2` is turned into a world angle first, so this is the
    /// exact inverse of [`Geometry::inverse`] for both conventions.
    pub fn forward(&self, q: JointPair) -> Planar {
        let q2_world = match self.convention() {
            JointConvention::Absolute => q.q2,
            JointConvention::Relative => q.q1 + q.q2,
        };
        let (s1, c1) = q.q1.to_radians().sin_cos();
        let (s2, c2) = q2_world.to_radians().sin_cos();
        Planar {
            x: self.l1() * c1 + self.l2() * c2,
            y: self.l1() * s1 + self.l2() * s2,
        }
    }

    /// Inverse kinematics: planar position to joint angles on the
    /// configured elbow branch.
    ///
    /// Non-finite input is reported as unreachable.
    pub fn inverse(&self, p: Planar) -> Result<JointPair, Unreachable> {
        let (l1, l2) = (self.l1(), self.l2());
        let r_sq = p.x * p.x + p.y * p.y;
        let reach = self.reach();
        if !(r_sq <= reach * reach) {
            return Err(Unreachable {
                x: p.x,
                y: p.y,
                reach,
            });
        }

        // rounding at the boundary can push this just past +-1
        let cos_q12 = ((r_sq - l1 * l1 - l2 * l2) / (2.0 * l1 * l2)).clamp(-1.0, 1.0);
        let q12 = cos_q12.acos();
        // angle between the lower link and the line to the target
        let beta = (l2 * q12.sin()).atan2(l1 + l2 * cos_q12);
        let bearing = p.y.atan2(p.x);

        let (q1, q12) = match self.elbow() {
            Elbow::Up => (bearing + beta, -q12),
            Elbow::Down => (bearing - beta, q12),
        };
        let q2 = match self.convention() {
            JointConvention::Absolute => q1 + q12,
            JointConvention::Relative => q12,
        };

        Ok(JointPair {
            q1: q1.to_degrees(),
            q2: q2.to_degrees(),
        })
    }
}

/// Whole-vector transforms for a SCARA machine.
///
/// Axis 0 drives the lower link, axis 1 the upper link; every other axis
/// is passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaraKinematics {
    geometry: Geometry,
}

impl ScaraKinematics {
    /// Joint angles of the folded pose the machine powers up in.
    pub const PARKED: JointPair = JointPair { q1: 0.0, q2: -90.0 };

    pub fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Machine position (mm) from joint angles.
    pub fn transform_to_cartesian<const N: usize>(&self, angles: &Joints<N>) -> Cartesian<N> {
        let xy = self.geometry.forward(JointPair {
            q1: angles[X_AXIS],
            q2: angles[Y_AXIS],
        });
        let mut coords = Cartesian::new(angles.0);
        coords[X_AXIS] = xy.x;
        coords[Y_AXIS] = xy.y;
        tracing::trace!(q1 = angles[X_AXIS], q2 = angles[Y_AXIS], x = xy.x, y = xy.y, "to cartesian");
        coords
    }

    /// Joint angles from a machine position (mm).
    ///
    /// The caller raises the soft limit alarm on error.
    pub fn transform_from_cartesian<const N: usize>(
        &self,
        position: &Cartesian<N>,
    ) -> Result<Joints<N>, Unreachable> {
        let q = self
            .geometry
            .inverse(Planar {
                x: position.x(),
                y: position.y(),
            })
            .inspect_err(|err| tracing::warn!("{err}"))?;
        let mut target = Joints::new(position.0);
        target[X_AXIS] = q.q1;
        target[Y_AXIS] = q.q2;
        tracing::trace!(x = position.x(), y = position.y(), q1 = q.q1, q2 = q.q2, "from cartesian");
        Ok(target)
    }

    /// Joint angles from raw step counts.
    pub fn steps_to_joints<const N: usize>(
        steps: &[i32; N],
        axes: &[AxisSettings; N],
    ) -> Joints<N> {
        Joints::new(core::array::from_fn(|idx| axes[idx].steps_to_units(steps[idx])))
    }

    /// Step counts from joint angles, rounded to the nearest step.
    pub fn joints_to_steps<const N: usize>(
        angles: &Joints<N>,
        axes: &[AxisSettings; N],
    ) -> [i32; N] {
        core::array::from_fn(|idx| axes[idx].units_to_steps(angles[idx]))
    }

    /// Machine position (mm) from raw step counts.
    pub fn transform_steps_to_cartesian<const N: usize>(
        &self,
        steps: &[i32; N],
        axes: &[AxisSettings; N],
    ) -> Cartesian<N> {
        self.transform_to_cartesian(&Self::steps_to_joints(steps, axes))
    }

    /// Step record for the power-up pose; non-driven axes start at 0.
    pub fn parked_position<const N: usize>(axes: &[AxisSettings; N]) -> [i32; N] {
        let mut angles = Joints::<N>::default();
        angles[X_AXIS] = Self::PARKED.q1;
        angles[Y_AXIS] = Self::PARKED.q2;
        Self::joints_to_steps(&angles, axes)
    }
}
