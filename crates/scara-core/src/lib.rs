//! Core kinematics for two-link planar (SCARA) arms.
//!
//! Converts between joint and cartesian space, splits long cartesian
//! lines into joint-space waypoints, and adapts homing bookkeeping to the
//! arm's joints. Nothing here talks to hardware; callers own the step
//! position record and the motion queue.

pub mod coord;
pub mod geometry;
pub mod kinematics;
pub mod limits;
pub mod segment;
pub mod settings;
pub mod status;

pub use coord::{Cartesian, Joints, X_AXIS, Y_AXIS};
pub use geometry::{Elbow, Geometry, GeometryError, JointConvention};
pub use kinematics::{JointPair, Planar, ScaraKinematics, Unreachable};
pub use segment::{CancelToken, LineSegmenter, MAX_SEGMENT_LENGTH, SegmentationSession};
