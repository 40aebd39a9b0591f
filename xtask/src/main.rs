//! Developer automation for the SCARA workspace, run as `cargo xtask <command>`.

use anyhow::Result;
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace checks and demos")]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> Result<()> {
    let sh = xshell::Shell::new()?;
    Cli::parse().command.run(&sh)
}
