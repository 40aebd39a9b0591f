use anyhow::{Context, Result};
use scara_core::{
    Elbow, JointConvention, MAX_SEGMENT_LENGTH,
    settings::{AxisSettings, HomingSettings},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Number of axes the binary is built for: two joints plus Z.
pub const AXES: usize = 3;

/// Machine configuration for a SCARA arm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Arm geometry and solution branch
    #[serde(default)]
    pub robot: RobotConfig,

    /// Per-axis step scaling, in axis order
    #[serde(default = "default_axes")]
    pub axes: Vec<AxisSettings>,

    /// Homing cycle settings
    #[serde(default)]
    pub homing: HomingSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            robot: RobotConfig::default(),
            axes: default_axes(),
            homing: HomingSettings::default(),
        }
    }
}

/// Arm configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Length of the lower link in mm
    #[serde(default = "default_l1")]
    pub l1: f64,

    /// Length of the upper link in mm
    #[serde(default = "default_l2")]
    pub l2: f64,

    #[serde(default)]
    pub elbow: Elbow,

    #[serde(default)]
    pub joint_angles: JointConvention,

    /// Longest line piece before converting to joint space, in mm
    #[serde(default = "default_max_segment_length")]
    pub max_segment_length: f64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            l1: default_l1(),
            l2: default_l2(),
            elbow: Elbow::default(),
            joint_angles: JointConvention::default(),
            max_segment_length: default_max_segment_length(),
        }
    }
}

fn default_l1() -> f64 {
    500.0
}

fn default_l2() -> f64 {
    450.0
}

fn default_max_segment_length() -> f64 {
    MAX_SEGMENT_LENGTH
}

fn default_axes() -> Vec<AxisSettings> {
    vec![AxisSettings::default(); AXES]
}

impl Config {
    /// Load configuration from a file, auto-detecting TOML or JSON format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content).or_else(|_| Self::from_json(&content)),
        }
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config as TOML")
    }

    /// Parse configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse config as JSON")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.axes.len() != AXES {
            anyhow::bail!(
                "expected {AXES} axes, found {} in the axes table",
                self.axes.len()
            );
        }

        for (idx, axis) in self.axes.iter().enumerate() {
            if !(axis.steps_per_mm.is_finite() && axis.steps_per_mm > 0.0) {
                anyhow::bail!("axes[{idx}].steps_per_mm must be positive");
            }
        }

        if !(self.robot.max_segment_length.is_finite() && self.robot.max_segment_length > 0.0) {
            anyhow::bail!("robot.max_segment_length must be positive");
        }

        if self.homing.pulloff < 0.0 {
            anyhow::bail!("homing.pulloff cannot be negative");
        }

        Ok(())
    }

    /// Axis settings as a fixed-size table
    pub fn axes(&self) -> Result<[AxisSettings; AXES]> {
        self.axes
            .as_slice()
            .try_into()
            .with_context(|| format!("expected {AXES} axes, found {}", self.axes.len()))
    }
}
