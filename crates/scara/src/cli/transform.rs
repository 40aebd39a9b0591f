use super::{Machine, axis_values, print_json};
use crate::config::AXES;
use anyhow::{Context, Result};
use clap::Args;
use scara_core::{Cartesian, Joints};
use serde_json::json;

#[derive(Args)]
pub struct ForwardArgs {
    /// Joint angles in degrees, followed by the pass-through axes.
    #[arg(num_args = 1..=AXES, value_delimiter = ',', allow_negative_numbers = true)]
    pub angles: Vec<f64>,
}

impl ForwardArgs {
    pub fn run(&self, machine: &Machine) -> Result<()> {
        let angles = Joints::new(axis_values(&self.angles)?);
        let position = machine.kinematics.transform_to_cartesian(&angles);
        print_json(&json!({ "cartesian": position.as_slice() }))
    }
}

#[derive(Args)]
pub struct InverseArgs {
    /// Cartesian position in mm, followed by the pass-through axes.
    #[arg(num_args = 1..=AXES, value_delimiter = ',', allow_negative_numbers = true)]
    pub position: Vec<f64>,
}

impl InverseArgs {
    pub fn run(&self, machine: &Machine) -> Result<()> {
        let position = Cartesian::new(axis_values(&self.position)?);
        let angles = machine
            .kinematics
            .transform_from_cartesian(&position)
            .context("soft limit")?;
        print_json(&json!({ "joints": angles.as_slice() }))
    }
}
