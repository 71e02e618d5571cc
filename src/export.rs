//! Batch export orchestration: drive rasterization and file output for every
//! entry of a [`BatchJob`], strictly in order, one scratch canvas at a time.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use image::DynamicImage;
use thiserror::Error;
use tracing::{debug, error};

use crate::card::{AspectMode, CardRecord};
use crate::render::{self, CardRenderOptions};
use crate::split::BatchJob;
use crate::stats::EngagementStats;

/// Errors surfaced by the export pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no quotes to export; the input produced zero entries")]
    EmptyBatch,
    #[error("failed to rasterize card {index}")]
    Rasterize {
        index: usize,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to write {}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Sink for user-facing success and error notifications. The orchestrator
/// emits exactly one notification per outcome.
pub trait Notifier {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Notifier printing to stdout/stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&mut self, message: &str) {
        println!("{message}");
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Turns a card record into a pixel buffer at the requested geometry.
///
/// Rasterization is synchronous: the call returning is the render-complete
/// signal, so no settle delay is needed between mount and capture.
pub trait CardRasterizer {
    fn rasterize(
        &self,
        record: &CardRecord,
        options: &CardRenderOptions,
    ) -> Result<DynamicImage>;
}

/// Default rasterizer painting with the built-in card renderer.
#[derive(Debug, Default)]
pub struct CanvasRasterizer;

impl CardRasterizer for CanvasRasterizer {
    fn rasterize(
        &self,
        record: &CardRecord,
        options: &CardRenderOptions,
    ) -> Result<DynamicImage> {
        render::render_card(record, options)
    }
}

/// Parameters for one batch export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub mode: AspectMode,
    pub out_dir: PathBuf,
    pub scale: u32,
    /// Pause inserted between entries. Zero by default: sequential file
    /// writes cannot pile up the way browser downloads do, but hosts that
    /// debounce file creation can still ask for spacing.
    pub pacing: Duration,
}

impl ExportOptions {
    pub fn new(mode: AspectMode, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            out_dir: out_dir.into(),
            scale: 1,
            pacing: Duration::ZERO,
        }
    }
}

/// Outcome of a completed batch export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub exported: usize,
    pub files: Vec<PathBuf>,
}

/// Export one file per entry of `job`, named `quote-<index>-<suffix>.png`
/// with a 1-based index in parse order.
///
/// The template is an immutable snapshot: entries only swap the quote text
/// in, plus freshly randomized stats when the template carries stats. The
/// batch aborts on the first failing entry (the observed policy of the
/// original pipeline); the failing entry's canvas is released before
/// returning, like every other entry's.
pub fn export_batch<R: CardRasterizer, N: Notifier>(
    job: &BatchJob,
    template: &CardRecord,
    options: &ExportOptions,
    rasterizer: &R,
    notifier: &mut N,
) -> Result<ExportSummary, ExportError> {
    match run_batch(job, template, options, rasterizer) {
        Ok(summary) => {
            notifier.success(&format!(
                "exported {} quote card(s) to {}",
                summary.exported,
                options.out_dir.display()
            ));
            Ok(summary)
        }
        Err(err) => {
            error!("batch export aborted: {}", describe(&err));
            notifier.error(&describe(&err));
            Err(err)
        }
    }
}

fn run_batch<R: CardRasterizer>(
    job: &BatchJob,
    template: &CardRecord,
    options: &ExportOptions,
    rasterizer: &R,
) -> Result<ExportSummary, ExportError> {
    if job.is_empty() {
        return Err(ExportError::EmptyBatch);
    }

    fs::create_dir_all(&options.out_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            options.out_dir.display()
        )
    })?;

    let render_options = CardRenderOptions {
        mode: options.mode,
        scale: options.scale,
        background: None,
    };

    let total = job.len();
    let mut summary = ExportSummary::default();
    for (idx, quote) in job.iter().enumerate() {
        let index = idx + 1;
        let stats = if template.stats_enabled() {
            Some(EngagementStats::sample()?)
        } else {
            None
        };
        let record = template.for_entry(quote, stats);
        let path = options
            .out_dir
            .join(format!("quote-{index}-{}.png", options.mode.suffix()));
        debug!(index, total, file = %path.display(), "rasterizing card");

        // The scratch canvas lives only for this iteration; it is dropped on
        // success and failure paths alike before the next entry begins.
        let image = rasterizer
            .rasterize(&record, &render_options)
            .map_err(|source| ExportError::Rasterize { index, source })?;
        image.save(&path).map_err(|source| ExportError::Save {
            path: path.clone(),
            source: source.into(),
        })?;

        summary.exported += 1;
        summary.files.push(path);

        if index < total && !options.pacing.is_zero() {
            thread::sleep(options.pacing);
        }
    }
    Ok(summary)
}

/// Export a single card with the fixed mode-specific filename.
///
/// `output` may name a `.png` file directly; anything else is treated as a
/// directory that receives `quote-card-<suffix>.png`.
pub fn export_single<R: CardRasterizer, N: Notifier>(
    record: &CardRecord,
    output: &Path,
    render_options: &CardRenderOptions,
    rasterizer: &R,
    notifier: &mut N,
) -> Result<PathBuf, ExportError> {
    match run_single(record, output, render_options, rasterizer) {
        Ok(path) => {
            notifier.success(&format!("saved quote card to {}", path.display()));
            Ok(path)
        }
        Err(err) => {
            error!("export failed: {}", describe(&err));
            notifier.error(&describe(&err));
            Err(err)
        }
    }
}

fn run_single<R: CardRasterizer>(
    record: &CardRecord,
    output: &Path,
    render_options: &CardRenderOptions,
    rasterizer: &R,
) -> Result<PathBuf, ExportError> {
    let is_file_target = output
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);

    let target = if is_file_target {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory {}", parent.display())
                })?;
            }
        }
        output.to_path_buf()
    } else {
        fs::create_dir_all(output)
            .with_context(|| format!("failed to create output directory {}", output.display()))?;
        output.join(format!("quote-card-{}.png", render_options.mode.suffix()))
    };

    let image = rasterizer
        .rasterize(record, render_options)
        .map_err(|source| ExportError::Rasterize { index: 1, source })?;
    image.save(&target).map_err(|source| ExportError::Save {
        path: target.clone(),
        source: source.into(),
    })?;
    Ok(target)
}

fn describe(err: &ExportError) -> String {
    match std::error::Error::source(err) {
        Some(source) => format!("{err}: {source}"),
        None => err.to_string(),
    }
}
