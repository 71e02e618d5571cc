//! Export commands (`quotecard render ...`).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand};
use quotecard::{
    BatchJob, CanvasRasterizer, CardRenderOptions, ConsoleNotifier, ENTRY_SEPARATOR,
    ExportOptions, LINE_BREAK_MARKER, export_batch, export_single, split_bulk_text, split_lines,
};

use crate::cli::common::AspectModeArg;
use crate::cli::utils::{CardForm, read_text_arg};

/// Available render subcommands.
#[derive(Subcommand, Debug)]
pub enum RenderCommand {
    /// Export a single quote card.
    Card(RenderCardArgs),
    /// Export every quote found in delimited bulk text.
    Batch(RenderBatchArgs),
    /// Export one card per non-empty input line.
    Lines(RenderLinesArgs),
}

/// Args for `quotecard render card`.
#[derive(Args, Debug)]
pub struct RenderCardArgs {
    /// Quote text.
    #[arg(long)]
    pub text: Option<String>,
    /// Read the quote from a file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
    /// Output directory, or a `.png` path.
    #[arg(short = 'o', long = "output", default_value = ".")]
    pub output: PathBuf,
    /// Output geometry.
    #[arg(long, default_value_t = AspectModeArg::Square, value_enum)]
    pub mode: AspectModeArg,
    /// Integer resolution multiplier.
    #[arg(long, default_value_t = 1)]
    pub scale: u32,
    #[command(flatten)]
    pub form: CardForm,
}

/// Args for `quotecard render batch`.
#[derive(Args, Debug)]
pub struct RenderBatchArgs {
    /// Inline bulk text.
    #[arg(long)]
    pub text: Option<String>,
    /// Read bulk text from a file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
    /// Output directory for generated PNGs.
    #[arg(short = 'o', long = "output", default_value = ".")]
    pub output: PathBuf,
    /// Output geometry.
    #[arg(long, default_value_t = AspectModeArg::Square, value_enum)]
    pub mode: AspectModeArg,
    /// Integer resolution multiplier.
    #[arg(long, default_value_t = 1)]
    pub scale: u32,
    /// Token separating entries.
    #[arg(long, default_value = ENTRY_SEPARATOR)]
    pub separator: String,
    /// Token replaced by a newline inside an entry.
    #[arg(long = "line-break", default_value = LINE_BREAK_MARKER)]
    pub line_break: String,
    /// Pause between entries, in milliseconds.
    #[arg(long = "pacing-ms", default_value_t = 0)]
    pub pacing_ms: u64,
    #[command(flatten)]
    pub form: CardForm,
}

/// Args for `quotecard render lines`.
#[derive(Args, Debug)]
pub struct RenderLinesArgs {
    /// Inline text, one quote per line.
    #[arg(long)]
    pub text: Option<String>,
    /// Read line-oriented text from a file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
    /// Output directory for generated PNGs.
    #[arg(short = 'o', long = "output", default_value = ".")]
    pub output: PathBuf,
    /// Output geometry.
    #[arg(long, default_value_t = AspectModeArg::Square, value_enum)]
    pub mode: AspectModeArg,
    /// Integer resolution multiplier.
    #[arg(long, default_value_t = 1)]
    pub scale: u32,
    /// Pause between entries, in milliseconds.
    #[arg(long = "pacing-ms", default_value_t = 0)]
    pub pacing_ms: u64,
    #[command(flatten)]
    pub form: CardForm,
}

/// Execute a render command.
pub fn handle(command: RenderCommand) -> Result<()> {
    match command {
        RenderCommand::Card(args) => card(args),
        RenderCommand::Batch(args) => batch(args),
        RenderCommand::Lines(args) => lines(args),
    }
}

fn card(args: RenderCardArgs) -> Result<()> {
    let template = args.form.resolve_template()?;
    let quote = read_text_arg(args.text, args.from)?;
    let record = template.for_entry(quote.trim(), template.stats.clone());
    let render_options = CardRenderOptions {
        scale: args.scale,
        ..CardRenderOptions::new(args.mode.into())
    };

    let rasterizer = CanvasRasterizer;
    let mut notifier = ConsoleNotifier;
    match export_single(
        &record,
        &args.output,
        &render_options,
        &rasterizer,
        &mut notifier,
    ) {
        Ok(_) => Ok(()),
        // Already reported through the notifier.
        Err(_) => std::process::exit(1),
    }
}

fn batch(args: RenderBatchArgs) -> Result<()> {
    let raw = read_text_arg(args.text, args.from)?;
    let job = split_bulk_text(&raw, &args.separator, &args.line_break);
    export_job(
        &job,
        &args.form,
        args.output,
        args.mode,
        args.scale,
        args.pacing_ms,
    )
}

fn lines(args: RenderLinesArgs) -> Result<()> {
    let raw = read_text_arg(args.text, args.from)?;
    let job = split_lines(&raw);
    export_job(
        &job,
        &args.form,
        args.output,
        args.mode,
        args.scale,
        args.pacing_ms,
    )
}

fn export_job(
    job: &BatchJob,
    form: &CardForm,
    output: PathBuf,
    mode: AspectModeArg,
    scale: u32,
    pacing_ms: u64,
) -> Result<()> {
    let template = form.resolve_template()?;
    let mut options = ExportOptions::new(mode.into(), output);
    options.scale = scale;
    options.pacing = Duration::from_millis(pacing_ms);

    let rasterizer = CanvasRasterizer;
    let mut notifier = ConsoleNotifier;
    match export_batch(job, &template, &options, &rasterizer, &mut notifier) {
        Ok(_) => Ok(()),
        // Already reported through the notifier.
        Err(_) => std::process::exit(1),
    }
}
