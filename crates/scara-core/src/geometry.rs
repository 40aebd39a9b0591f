//! Arm geometry and the solution branch it is built for.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which of the two inverse kinematics solutions the arm uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Elbow {
    #[default]
    Up,
    Down,
}

/// How the second joint angle is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointConvention {
    /// `q2` is the world angle of the upper link.
    #[default]
    Absolute,
    /// `q2` is measured from the lower link.
    Relative,
}

impl JointConvention {
    /// Parse a joint convention from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "absolute" | "abs" => Some(JointConvention::Absolute),
            "relative" | "rel" => Some(JointConvention::Relative),
            _ => None,
        }
    }
}

impl Elbow {
    /// Parse an elbow configuration from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Elbow::Up),
            "down" => Some(Elbow::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("link {link} length must be a positive finite number, got {value}")]
    InvalidLinkLength { link: u8, value: f64 },
}

/// Link lengths (mm) plus the branch configuration. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    l1: f64,
    l2: f64,
    elbow: Elbow,
    convention: JointConvention,
}

impl Geometry {
    pub fn new(
        l1: f64,
        l2: f64,
        elbow: Elbow,
        convention: JointConvention,
    ) -> Result<Self, GeometryError> {
        for (link, value) in [(1, l1), (2, l2)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::InvalidLinkLength { link, value });
            }
        }
        Ok(Self {
            l1,
            l2,
            elbow,
            convention,
        })
    }

    pub fn l1(&self) -> f64 {
        self.l1
    }

    pub fn l2(&self) -> f64 {
        self.l2
    }

    pub fn elbow(&self) -> Elbow {
        self.elbow
    }

    pub fn convention(&self) -> JointConvention {
        self.convention
    }

    /// Distance from the base to the fully stretched tip.
    pub fn reach(&self) -> f64 {
        self.l1 + self.l2
    }
}
