//! Shared clap helper types for CLI commands.

use std::fmt;

use clap::ValueEnum;
use quotecard::AspectMode;

/// Output geometry selector accepted by render commands.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum AspectModeArg {
    /// 1:1 at 1080x1080.
    Square,
    /// 9:16 at 1080x1920.
    Vertical,
}

impl From<AspectModeArg> for AspectMode {
    fn from(value: AspectModeArg) -> AspectMode {
        match value {
            AspectModeArg::Square => AspectMode::Square,
            AspectModeArg::Vertical => AspectMode::Vertical,
        }
    }
}

impl fmt::Display for AspectModeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectModeArg::Square => write!(f, "square"),
            AspectModeArg::Vertical => write!(f, "vertical"),
        }
    }
}
