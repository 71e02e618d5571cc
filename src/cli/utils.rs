//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quotecard::{
    CardRecord, Emphasis, EngagementStats, Profile, Theme, default_profile_path, load_avatar,
};
use tracing::debug;

/// Identity and styling flags shared by every render command.
#[derive(Args, Debug)]
pub struct CardForm {
    /// Display name; defaults to the stored profile.
    #[arg(long)]
    pub name: Option<String>,

    /// Handle shown after the `@`; defaults to the stored profile.
    #[arg(long)]
    pub handle: Option<String>,

    /// Profile image file (PNG or JPEG, at most 5 MiB).
    #[arg(long)]
    pub avatar: Option<PathBuf>,

    /// Draw the quote in bold.
    #[arg(long)]
    pub bold: bool,

    /// Draw the quote in italics.
    #[arg(long)]
    pub italic: bool,

    /// Use the dark theme.
    #[arg(long)]
    pub dark: bool,

    /// Skip the randomized engagement stats row.
    #[arg(long = "no-stats")]
    pub no_stats: bool,

    /// Alternative profile file location.
    #[arg(long)]
    pub profile: Option<PathBuf>,
}

impl CardForm {
    /// Build the shared card template for an export run.
    ///
    /// The stored profile fills in whatever `--name`/`--handle` left out, and
    /// values that were passed are remembered for the next invocation.
    pub fn resolve_template(&self) -> Result<CardRecord> {
        let profile_path = match &self.profile {
            Some(path) => path.clone(),
            None => default_profile_path()?,
        };
        let mut profile = Profile::load(&profile_path)?;
        if profile.remember(self.name.as_deref(), self.handle.as_deref()) {
            profile.save(&profile_path)?;
            debug!(path = %profile_path.display(), "stored profile updated");
        }

        let avatar = match &self.avatar {
            Some(path) => Some(load_avatar(path)?),
            None => None,
        };

        let stats = if self.no_stats {
            None
        } else {
            Some(EngagementStats::sample()?)
        };

        Ok(CardRecord {
            avatar,
            name: profile.name.clone().unwrap_or_default(),
            handle: profile.handle.clone().unwrap_or_default(),
            quote: String::new(),
            emphasis: Emphasis {
                bold: self.bold,
                italic: self.italic,
            },
            theme: if self.dark { Theme::Dark } else { Theme::Light },
            stats,
        })
    }
}

/// Resolve plain-text input for commands that accept either inline strings or files.
pub fn read_text_arg(text: Option<String>, from: Option<PathBuf>) -> Result<String> {
    if let Some(t) = text {
        return Ok(t);
    }
    if let Some(path) = from {
        if path.as_os_str() == "-" {
            return read_stdin();
        }
        return fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    read_stdin()
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}
