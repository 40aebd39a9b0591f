use super::{Machine, axis_values, print_json};
use crate::config::AXES;
use anyhow::{Context, Result};
use clap::Args;
use scara_core::{Cartesian, Joints};
use serde_json::json;

#[derive(Args)]
pub struct SegmentArgs {
    /// Current joint position, comma separated.
    #[arg(long, num_args = 1..=AXES, value_delimiter = ',', allow_negative_numbers = true)]
    pub from: Vec<f64>,

    /// Cartesian target, comma separated.
    #[arg(long, num_args = 1..=AXES, value_delimiter = ',', allow_negative_numbers = true)]
    pub to: Vec<f64>,

    /// Treat the line as a rapid move (never segmented).
    #[arg(long)]
    pub rapid: bool,
}

impl SegmentArgs {
    pub fn run(&self, machine: &Machine) -> Result<()> {
        let from = Joints::new(axis_values(&self.from)?);
        let to = Cartesian::new(axis_values(&self.to)?);

        let session = machine.segmenter.init(to, &from, self.rapid);
        tracing::info!(
            iterations = session.iterations(),
            segmenting = session.is_segmenting(),
            "Segmenting line"
        );

        for (index, waypoint) in session.enumerate() {
            let joints = waypoint
                .with_context(|| format!("soft limit at waypoint {index}"))?;
            print_json(&json!({ "index": index, "joints": joints.as_slice() }))?;
        }
        Ok(())
    }
}
