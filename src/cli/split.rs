//! Split inspection commands (`quotecard split ...`).
//!
//! Lets users check how their delimited bulk text will be cut into entries
//! before committing to a full export.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use quotecard::{BatchJob, ENTRY_SEPARATOR, LINE_BREAK_MARKER, split_bulk_text};

use crate::cli::utils::read_text_arg;

/// Available split subcommands.
#[derive(Subcommand, Debug)]
pub enum SplitCommand {
    /// List the entries bulk text splits into.
    Preview(SplitArgs),
    /// Count the entries without printing them.
    Count(SplitArgs),
}

/// Shared args for split commands.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Inline bulk text.
    #[arg(long)]
    pub text: Option<String>,
    /// Read bulk text from a file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
    /// Token separating entries.
    #[arg(long, default_value = ENTRY_SEPARATOR)]
    pub separator: String,
    /// Token replaced by a newline inside an entry.
    #[arg(long = "line-break", default_value = LINE_BREAK_MARKER)]
    pub line_break: String,
}

/// Execute a split command.
pub fn handle(command: SplitCommand) -> Result<()> {
    match command {
        SplitCommand::Preview(args) => preview(args),
        SplitCommand::Count(args) => count(args),
    }
}

fn split(args: SplitArgs) -> Result<BatchJob> {
    let raw = read_text_arg(args.text, args.from)?;
    Ok(split_bulk_text(&raw, &args.separator, &args.line_break))
}

fn preview(args: SplitArgs) -> Result<()> {
    let job = split(args)?;
    for (idx, entry) in job.iter().enumerate() {
        println!("Entry {:>3}:", idx + 1);
        for line in entry.lines() {
            println!("    {line}");
        }
    }
    println!("{} entr{}", job.len(), if job.len() == 1 { "y" } else { "ies" });
    Ok(())
}

fn count(args: SplitArgs) -> Result<()> {
    let job = split(args)?;
    println!("{}", job.len());
    Ok(())
}
