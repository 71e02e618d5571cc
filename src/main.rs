use anyhow::Result;
use clap::Parser;
use tracing::Level;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
    cli::run(cli)
}
