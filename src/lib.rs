//! Core library for quote card composition and batch PNG export.

mod card;
mod export;
mod profile;
mod render;
mod split;
mod stats;

pub use card::{AspectMode, CardRecord, Emphasis, Theme};
pub use export::{
    CanvasRasterizer, CardRasterizer, ConsoleNotifier, ExportError, ExportOptions, ExportSummary,
    Notifier, export_batch, export_single,
};
pub use profile::{AvatarError, MAX_AVATAR_BYTES, Profile, default_profile_path, load_avatar};
pub use render::{CardRenderOptions, render_card, theme_background};
pub use split::{BatchJob, ENTRY_SEPARATOR, LINE_BREAK_MARKER, split_bulk_text, split_lines};
pub use stats::{EngagementStats, format_count};

/// Split bulk text into a job using the documented delimiter tokens
/// (`^"` between entries, `*"` standing for a line break).
pub fn split_with_default_tokens(raw: &str) -> BatchJob {
    split::split_bulk_text(raw, ENTRY_SEPARATOR, LINE_BREAK_MARKER)
}
