//! Persisted author identity (display name and handle) plus profile image
//! loading. The identity survives sessions in a small JSON file so repeated
//! exports don't have to restate it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Profile images above this many bytes are rejected before decoding.
pub const MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;

/// Errors raised while loading a profile image.
#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("profile image {path} is {size} bytes; the limit is {MAX_AVATAR_BYTES} bytes (5 MiB)")]
    Oversized { path: PathBuf, size: u64 },
    #[error("failed to read profile image {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

/// Load and decode a profile image, enforcing the size ceiling first so an
/// oversized file is rejected without touching prior state.
pub fn load_avatar(path: &Path) -> Result<DynamicImage, AvatarError> {
    let size = fs::metadata(path)
        .map_err(|err| AvatarError::Unreadable {
            path: path.to_path_buf(),
            source: err.into(),
        })?
        .len();
    if size > MAX_AVATAR_BYTES {
        return Err(AvatarError::Oversized {
            path: path.to_path_buf(),
            size,
        });
    }
    image::open(path).map_err(|err| AvatarError::Unreadable {
        path: path.to_path_buf(),
        source: err.into(),
    })
}

/// Author identity retained across invocations.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Read the profile file, returning the default profile when none exists.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read profile {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse profile {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create profile directory {}", parent.display())
                })?;
            }
        }
        let mut stamped = self.clone();
        stamped.updated_at = Some(Utc::now());
        let raw = serde_json::to_string_pretty(&stamped).context("failed to encode profile")?;
        fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Merge values given on the command line over the stored ones. Returns
    /// true when anything changed and the profile should be saved back.
    pub fn remember(&mut self, name: Option<&str>, handle: Option<&str>) -> bool {
        let mut changed = false;
        if let Some(name) = name {
            if self.name.as_deref() != Some(name) {
                self.name = Some(name.to_string());
                changed = true;
            }
        }
        if let Some(handle) = handle {
            if self.handle.as_deref() != Some(handle) {
                self.handle = Some(handle.to_string());
                changed = true;
            }
        }
        changed
    }
}

/// Default location of the profile file:
/// `$XDG_CONFIG_HOME/quotecard/profile.json`, falling back to
/// `$HOME/.config/quotecard/profile.json`.
pub fn default_profile_path() -> Result<PathBuf> {
    if let Some(base) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(base).join("quotecard").join("profile.json"));
    }
    let home = env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow!("neither XDG_CONFIG_HOME nor HOME is set"))?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("quotecard")
        .join("profile.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch(name: &str) -> PathBuf {
        let dir = PathBuf::from("target").join("profile_tests");
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn missing_file_loads_as_default() {
        let profile = Profile::load(Path::new("target/does-not-exist.json")).unwrap();
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn profile_round_trips_through_disk() {
        let path = scratch("roundtrip.json");
        let mut profile = Profile::default();
        profile.remember(Some("Ada Lovelace"), Some("ada"));
        profile.save(&path).unwrap();

        let loaded = Profile::load(&path).unwrap();
        assert_eq!(loaded.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(loaded.handle.as_deref(), Some("ada"));
        assert!(loaded.updated_at.is_some());
    }

    #[test]
    fn remember_reports_changes() {
        let mut profile = Profile::default();
        assert!(profile.remember(Some("Ada"), None));
        assert!(!profile.remember(Some("Ada"), None));
        assert!(profile.remember(None, Some("ada")));
        assert!(!profile.remember(None, None));
    }

    #[test]
    fn oversized_avatar_is_rejected_before_decode() {
        let path = scratch("too-big.png");
        let bytes = vec![0u8; (MAX_AVATAR_BYTES + 1) as usize];
        std::fs::write(&path, bytes).unwrap();

        match load_avatar(&path) {
            Err(AvatarError::Oversized { size, .. }) => {
                assert_eq!(size, MAX_AVATAR_BYTES + 1);
            }
            other => panic!("expected Oversized, got {other:?}"),
        }
    }
}
