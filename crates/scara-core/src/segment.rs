//! Line segmentation.
//!
//! A straight cartesian move turns into a curve once it is interpolated
//! in joint space, so long feed moves are chopped into short pieces that
//! are each converted on their own. The motion planner calls
//! [`LineSegmenter::init`] once per queued line and then pulls joint
//! targets from the returned [`SegmentationSession`] until it yields
//! `None`.

use crate::{
    coord::{Cartesian, Joints},
    kinematics::{ScaraKinematics, Unreachable},
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Longest planar distance covered by one segment, mm.
pub const MAX_SEGMENT_LENGTH: f64 = 2.0;

// keeps the count finite for absurd targets; those fail on the first waypoint
const MAX_ITERATIONS: usize = u32::MAX as usize;

/// Stop request shared with the jog-cancel handler.
///
/// Checked once per waypoint; segments already handed out stay queued.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Builds segmentation sessions for one arm.
#[derive(Debug, Clone)]
pub struct LineSegmenter {
    kinematics: ScaraKinematics,
    max_segment_length: f64,
    cancel: CancelToken,
}

impl LineSegmenter {
    pub fn new(kinematics: ScaraKinematics) -> Self {
        Self {
            kinematics,
            max_segment_length: MAX_SEGMENT_LENGTH,
            cancel: CancelToken::new(),
        }
    }

    /// Use a different segment length. Non-positive or non-finite values
    /// keep the default.
    pub fn with_max_segment_length(mut self, length: f64) -> Self {
        if length.is_finite() && length > 0.0 {
            self.max_segment_length = length;
        }
        self
    }

    pub fn max_segment_length(&self) -> f64 {
        self.max_segment_length
    }

    pub fn kinematics(&self) -> &ScaraKinematics {
        &self.kinematics
    }

    /// Handle for whoever needs to stop an in-flight line.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Start segmenting a line from the current joint position to a
    /// cartesian target. Clears any earlier cancel request.
    ///
    /// Only the driven plane decides whether to segment; pass-through axes
    /// are interpolated along but never force extra segments. Rapid moves
    /// are never segmented.
    pub fn init<const N: usize>(
        &self,
        target: Cartesian<N>,
        position: &Joints<N>,
        rapid_motion: bool,
    ) -> SegmentationSession<N> {
        self.cancel.reset();

        let current = self.kinematics.transform_to_cartesian(position);
        let mut delta = target - current;
        let distance = delta.planar_norm();
        let segmenting = !rapid_motion && distance > self.max_segment_length;

        let (iterations, segment_target) = if segmenting {
            let iterations =
                ((distance / self.max_segment_length).ceil() as usize).min(MAX_ITERATIONS);
            delta = delta / iterations as f64;
            (iterations, current)
        } else {
            (1, target)
        };

        tracing::debug!(
            iterations,
            segmenting,
            distance,
            dx = delta.x(),
            dy = delta.y(),
            "segment line"
        );

        SegmentationSession {
            kinematics: self.kinematics,
            final_target: target,
            delta,
            segment_target,
            iterations,
            // one extra pull reports completion
            remaining: iterations.saturating_add(1),
            segmenting,
            cancel: self.cancel.clone(),
        }
    }
}

/// State of one line being segmented.
///
/// Yields `Ok(joints)` for each waypoint, `Err` once if a waypoint falls
/// outside the reach (raise the soft limit alarm), and `None` when the
/// line is complete or was cancelled.
#[derive(Debug)]
pub struct SegmentationSession<const N: usize> {
    kinematics: ScaraKinematics,
    final_target: Cartesian<N>,
    delta: Cartesian<N>,
    segment_target: Cartesian<N>,
    iterations: usize,
    remaining: usize,
    segmenting: bool,
    cancel: CancelToken,
}

impl<const N: usize> SegmentationSession<N> {
    /// Number of waypoints a full run produces.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn is_segmenting(&self) -> bool {
        self.segmenting
    }

    pub fn final_target(&self) -> &Cartesian<N> {
        &self.final_target
    }

    /// Cartesian point of the most recent waypoint.
    pub fn segment_target(&self) -> &Cartesian<N> {
        &self.segment_target
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    fn finish(&mut self) {
        self.remaining = 0;
    }
}

impl<const N: usize> Iterator for SegmentationSession<N> {
    type Item = Result<Joints<N>, Unreachable>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        if self.segmenting && self.remaining > 1 {
            self.segment_target += self.delta;
        } else {
            // land exactly on the target regardless of accumulated error
            self.segment_target = self.final_target;
        }

        let joints = match self.kinematics.transform_from_cartesian(&self.segment_target) {
            Ok(joints) => joints,
            Err(err) => {
                self.finish();
                return Some(Err(err));
            }
        };

        tracing::trace!(
            remaining = self.remaining,
            x = self.segment_target.x(),
            y = self.segment_target.y(),
            q1 = joints.q1(),
            q2 = joints.q2(),
            "segment"
        );

        if self.remaining == 0 || self.cancel.is_cancelled() {
            self.finish();
            return None;
        }
        Some(Ok(joints))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining.saturating_sub(1)))
    }
}

impl<const N: usize> core::iter::FusedIterator for SegmentationSession<N> {}
