use anyhow::Result;
use clap::{Args, Subcommand};
use xshell::{Shell, cmd};

#[derive(Subcommand)]
pub enum Command {
    /// Check formatting, run clippy, then the test suite
    Ci(TestArgs),
    /// Apply rustfmt to all files
    Fmt,
    /// Run the test suite
    Test(TestArgs),
    /// Segment a sample line with the default machine and print the waypoints
    Demo,
}

#[derive(Args, Default)]
pub struct TestArgs {
    /// Additional arguments to pass to cargo test
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

impl Command {
    pub fn run(self, sh: &Shell) -> Result<()> {
        match self {
            Command::Ci(args) => {
                fmt_check(sh)?;
                clippy(sh)?;
                test(sh, &args)
            }
            Command::Fmt => {
                eprintln!("Applying cargo fmt...");
                cmd!(sh, "cargo fmt --all").run()?;
                Ok(())
            }
            Command::Test(args) => test(sh, &args),
            Command::Demo => {
                cmd!(
                    sh,
                    "cargo run -p scara -- segment --from 0,-90,0 --to 800,0,0"
                )
                .run()?;
                Ok(())
            }
        }
    }
}

fn fmt_check(sh: &Shell) -> Result<()> {
    eprintln!("Running cargo fmt check...");
    cmd!(sh, "cargo fmt --all -- --check").run()?;
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    eprintln!("Running cargo clippy...");
    cmd!(sh, "cargo clippy --all-targets --workspace -- -D warnings").run()?;
    Ok(())
}

fn test(sh: &Shell, test_args: &TestArgs) -> Result<()> {
    eprintln!("Running cargo test...");
    let args = &test_args.args;
    cmd!(sh, "cargo test --workspace {args...}").run()?;
    Ok(())
}
