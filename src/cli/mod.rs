//! Command-line interface wiring for the `quotecard` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! specialized submodules that encapsulate each command family.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod common;
pub mod profile;
pub mod render;
pub mod split;
pub mod utils;

/// Parsed CLI entrypoint for the `quotecard` binary.
#[derive(Parser, Debug)]
#[command(
    name = "quotecard",
    version,
    about = "Minimalist quote card generator for social media images"
)]
pub struct Cli {
    /// Enable verbose logging.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// High-level command families made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Render(render::RenderCommand),
    #[command(subcommand)]
    Split(split::SplitCommand),
    #[command(subcommand)]
    Profile(profile::ProfileCommand),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render(cmd) => render::handle(cmd),
        Command::Split(cmd) => split::handle(cmd),
        Command::Profile(cmd) => profile::handle(cmd),
    }
}
