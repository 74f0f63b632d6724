use clap::Parser;
use frontctl::cli::{run_cli, Cli};
use frontctl::config::RuntimeConfig;
use frontctl::telemetry::init_logging;

fn main() -> anyhow::Result<()> {
    let config = RuntimeConfig::from_env();
    init_logging(&config)?;
    run_cli(Cli::parse())
}
