use super::{Machine, axis_values, print_json};
use crate::config::AXES;
use anyhow::{Context, Result};
use clap::Args;
use scara_core::{ScaraKinematics, settings::AxisMask};
use serde_json::json;

#[derive(Args)]
pub struct StatusArgs {
    /// Step record, comma separated. Defaults to the parked pose.
    #[arg(long, num_args = 1..=AXES, value_delimiter = ',', allow_negative_numbers = true)]
    pub steps: Option<Vec<i32>>,
}

impl StatusArgs {
    pub fn run(&self, machine: &Machine) -> Result<()> {
        let steps = match &self.steps {
            Some(steps) => axis_values(steps)?,
            None => ScaraKinematics::parked_position(&machine.axes),
        };
        print_json(&machine.kinematics.status_report(&steps, &machine.axes))
    }
}

#[derive(Args)]
pub struct HomeArgs {
    /// Step record at the moment the switches tripped, comma separated.
    #[arg(long, num_args = 1..=AXES, value_delimiter = ',', allow_negative_numbers = true)]
    pub steps: Vec<i32>,

    /// Bitmask of the axes homed in this cycle.
    #[arg(long, default_value_t = 0b11)]
    pub cycle: u8,

    /// Rewrite a single axis instead of the whole cycle.
    #[arg(long, conflicts_with = "cycle")]
    pub axis: Option<usize>,
}

impl HomeArgs {
    pub fn run(&self, machine: &Machine) -> Result<()> {
        let mut position = axis_values(&self.steps)?;
        let homed = match self.axis {
            Some(idx) if idx >= AXES => anyhow::bail!("axis {idx} out of range"),
            Some(idx) => {
                tracing::info!(
                    mask = machine.limits.axis_mask(idx).bits(),
                    "Homing axis {idx}"
                );
                machine.limits.set_target_position(idx, &mut position)
            }
            None => machine
                .limits
                .set_machine_positions(AxisMask::from_bits(self.cycle), &mut position),
        };
        homed.context("soft limit")?;
        print_json(&json!({ "position": position }))
    }
}
