use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let machine = cli.machine.load()?;
    match cli.command {
        Command::Forward(args) => args.run(&machine),
        Command::Inverse(args) => args.run(&machine),
        Command::Segment(args) => args.run(&machine),
        Command::Status(args) => args.run(&machine),
        Command::Home(args) => args.run(&machine),
    }
}

/// Logs go to stderr so stdout only carries JSON output.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(name = "scara", about = "Kinematics tooling for two-link SCARA arms")]
struct Cli {
    #[command(flatten)]
    machine: MachineArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct MachineArgs {
    /// Path to the machine configuration file (TOML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the elbow configuration (`up` or `down`).
    #[arg(long, global = true, value_parser = cli::parse_elbow)]
    elbow: Option<scara_core::Elbow>,

    /// Override how `q2` is measured (`absolute` or `relative`).
    #[arg(long, global = true, value_parser = cli::parse_convention)]
    joint_angles: Option<scara_core::JointConvention>,
}

impl MachineArgs {
    fn load(&self) -> Result<cli::Machine> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading machine config: {}", path.display());
                config::Config::from_file(path)?
            }
            None => config::Config::default(),
        };
        if let Some(elbow) = self.elbow {
            config.robot.elbow = elbow;
        }
        if let Some(convention) = self.joint_angles {
            config.robot.joint_angles = convention;
        }
        config.validate()?;
        cli::Machine::new(&config)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Convert joint angles to a cartesian position.
    Forward(cli::transform::ForwardArgs),
    /// Convert a cartesian position to joint angles.
    Inverse(cli::transform::InverseArgs),
    /// Split a line into joint-space waypoints.
    Segment(cli::segment::SegmentArgs),
    /// Print the kinematics status fields.
    Status(cli::machine::StatusArgs),
    /// Apply homing bookkeeping to a step record.
    Home(cli::machine::HomeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_angles() {
        let cli = Cli::try_parse_from(["scara", "forward", "0", "-90", "0"]).unwrap();
        let Command::Forward(args) = cli.command else {
            panic!("expected forward");
        };
        assert_eq!(args.angles, vec![0.0, -90.0, 0.0]);
    }

    #[test]
    fn parses_segment_vectors() {
        let cli = Cli::try_parse_from([
            "scara",
            "segment",
            "--from",
            "0,-90,0",
            "--to",
            "800,0,0",
            "--rapid",
            "--elbow",
            "down",
        ])
        .unwrap();
        assert_eq!(cli.machine.elbow, Some(scara_core::Elbow::Down));
        let Command::Segment(args) = cli.command else {
            panic!("expected segment");
        };
        assert_eq!(args.from, vec![0.0, -90.0, 0.0]);
        assert_eq!(args.to, vec![800.0, 0.0, 0.0]);
        assert!(args.rapid);
    }

    #[test]
    fn overrides_apply_to_defaults() {
        let args = MachineArgs {
            config: None,
            elbow: Some(scara_core::Elbow::Down),
            joint_angles: Some(scara_core::JointConvention::Relative),
        };
        let machine = args.load().unwrap();
        let geometry = machine.kinematics.geometry();
        assert_eq!(geometry.elbow(), scara_core::Elbow::Down);
        assert_eq!(geometry.convention(), scara_core::JointConvention::Relative);
    }
}
