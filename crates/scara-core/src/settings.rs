//! Per-axis machine settings consumed by the kinematics.

use serde::{Deserialize, Serialize};

/// Axis bit set, one bit per axis index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisMask(u8);

impl AxisMask {
    /// Number of axes a mask can describe.
    pub const CAPACITY: usize = u8::BITS as usize;

    /// Bit for `idx`, or no bit at all past the capacity.
    const fn flag(idx: usize) -> u8 {
        if idx < Self::CAPACITY { 1 << idx } else { 0 }
    }

    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bit(idx: usize) -> Self {
        Self(Self::flag(idx))
    }

    pub const fn with(mut self, idx: usize) -> Self {
        self.0 |= Self::flag(idx);
        self
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(&self, idx: usize) -> bool {
        self.0 & Self::flag(idx) != 0
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Step scaling and travel of a single axis.
///
/// For the two driven joints `steps_per_mm` is really steps per degree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSettings {
    pub steps_per_mm: f64,
    /// Stored as a negative value.
    #[serde(default = "default_max_travel")]
    pub max_travel: f64,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            steps_per_mm: default_steps_per_mm(),
            max_travel: default_max_travel(),
        }
    }
}

fn default_steps_per_mm() -> f64 {
    250.0
}

fn default_max_travel() -> f64 {
    -200.0
}

impl AxisSettings {
    pub fn steps_to_units(&self, steps: i32) -> f64 {
        steps as f64 / self.steps_per_mm
    }

    pub fn units_to_steps(&self, units: f64) -> i32 {
        (units * self.steps_per_mm).round() as i32
    }
}

/// Homing cycle behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HomingSettings {
    /// Retraction after a switch trips, in mm.
    #[serde(default)]
    pub pulloff: f64,
    /// Apply the pull-off to the homed position instead of leaving it at 0.
    #[serde(default)]
    pub force_set_origin: bool,
    /// Axes that home in the positive direction.
    #[serde(default)]
    pub dir_mask: AxisMask,
    /// Home both driven joints whenever either is requested.
    #[serde(default)]
    pub link_joints: bool,
}

impl HomingSettings {
    /// Step offset applied to a freshly homed axis.
    pub fn pulloff_steps(&self, idx: usize, axis: &AxisSettings) -> i32 {
        if !self.force_set_origin {
            return 0;
        }
        let units = if self.dir_mask.contains(idx) {
            axis.max_travel + self.pulloff
        } else {
            -self.pulloff
        };
        axis.units_to_steps(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_bits() {
        let mask = AxisMask::new().with(0).with(2);
        assert!(mask.contains(0));
        assert!(!mask.contains(1));
        assert!(mask.contains(2));
        assert_eq!(mask.bits(), 0b101);
        assert_eq!(AxisMask::bit(1).union(AxisMask::bit(0)), AxisMask::from_bits(0b11));
        assert!(AxisMask::new().is_empty());
    }

    #[test]
    fn mask_ignores_axes_past_capacity() {
        assert!(AxisMask::bit(8).is_empty());
        assert!(AxisMask::bit(usize::MAX).is_empty());
        assert_eq!(AxisMask::bit(7).with(9), AxisMask::from_bits(0x80));
        assert!(!AxisMask::from_bits(0xff).contains(12));
    }

    #[test]
    fn pulloff_depends_on_direction() {
        let axis = AxisSettings {
            steps_per_mm: 10.0,
            max_travel: -300.0,
        };
        let mut homing = HomingSettings {
            pulloff: 1.5,
            force_set_origin: false,
            dir_mask: AxisMask::bit(1),
            link_joints: false,
        };
        assert_eq!(homing.pulloff_steps(0, &axis), 0);

        homing.force_set_origin = true;
        assert_eq!(homing.pulloff_steps(0, &axis), -15);
        assert_eq!(homing.pulloff_steps(1, &axis), -2985);
    }

    #[test]
    fn step_conversion_rounds() {
        let axis = AxisSettings {
            steps_per_mm: 4.0,
            max_travel: -1.0,
        };
        assert_eq!(axis.steps_to_units(-360), -90.0);
        assert_eq!(axis.units_to_steps(1.13), 5);
        assert_eq!(axis.units_to_steps(-1.13), -5);
    }
}
