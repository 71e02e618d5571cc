//! Data model for a composed quote card.

use std::fmt;

use image::DynamicImage;

use crate::stats::EngagementStats;

/// Fixed output geometry for an exported card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectMode {
    /// 1:1, 1080x1080.
    Square,
    /// 9:16, 1080x1920.
    Vertical,
}

impl AspectMode {
    /// Output pixel dimensions before any scale factor is applied.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            AspectMode::Square => (1080, 1080),
            AspectMode::Vertical => (1080, 1920),
        }
    }

    /// Filename suffix used for exported PNGs.
    pub fn suffix(self) -> &'static str {
        match self {
            AspectMode::Square => "cuadrado",
            AspectMode::Vertical => "tiktok",
        }
    }

    /// Horizontal padding of the content block in base pixels.
    pub fn padding(self) -> u32 {
        match self {
            AspectMode::Square => 80,
            AspectMode::Vertical => 120,
        }
    }

    /// Quote text size in base pixels.
    pub fn quote_px(self) -> u32 {
        match self {
            AspectMode::Square => 49,
            AspectMode::Vertical => 55,
        }
    }
}

impl fmt::Display for AspectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectMode::Square => write!(f, "square"),
            AspectMode::Vertical => write!(f, "vertical"),
        }
    }
}

/// Text emphasis applied to the quote body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Emphasis {
    pub bold: bool,
    pub italic: bool,
}

/// Card color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Everything needed to paint one card. Immutable per render; a batch derives
/// one instance per entry from a shared template.
#[derive(Debug, Clone)]
pub struct CardRecord {
    pub avatar: Option<DynamicImage>,
    pub name: String,
    pub handle: String,
    pub quote: String,
    pub emphasis: Emphasis,
    pub theme: Theme,
    pub stats: Option<EngagementStats>,
}

impl CardRecord {
    /// Derive the ephemeral record for one batch entry: the template with the
    /// quote swapped in and the per-entry stats attached.
    pub fn for_entry(&self, quote: &str, stats: Option<EngagementStats>) -> CardRecord {
        CardRecord {
            quote: quote.to_string(),
            stats,
            ..self.clone()
        }
    }

    /// Whether engagement stats should be drawn (and re-rolled per entry).
    pub fn stats_enabled(&self) -> bool {
        self.stats.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn template() -> CardRecord {
        CardRecord {
            avatar: None,
            name: "Ada".to_string(),
            handle: "ada".to_string(),
            quote: String::new(),
            emphasis: Emphasis::default(),
            theme: Theme::Dark,
            stats: None,
        }
    }

    #[test]
    fn modes_fix_dimensions_and_suffixes() {
        assert_eq!(AspectMode::Square.dimensions(), (1080, 1080));
        assert_eq!(AspectMode::Vertical.dimensions(), (1080, 1920));
        assert_eq!(AspectMode::Square.suffix(), "cuadrado");
        assert_eq!(AspectMode::Vertical.suffix(), "tiktok");
    }

    #[test]
    fn for_entry_replaces_only_quote_and_stats() {
        let derived = template().for_entry("hello", None);
        assert_eq!(derived.quote, "hello");
        assert_eq!(derived.name, "Ada");
        assert_eq!(derived.theme, Theme::Dark);
        assert!(derived.stats.is_none());
    }
}
