//! Stored profile commands (`quotecard profile ...`).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Subcommand};
use quotecard::{Profile, default_profile_path};

/// Available profile subcommands.
#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Store the display name and handle used by future exports.
    Set(ProfileSetArgs),
    /// Print the stored profile.
    Show(ProfileLocationArgs),
    /// Delete the stored profile.
    Clear(ProfileLocationArgs),
}

/// Args for `quotecard profile set`.
#[derive(Args, Debug)]
pub struct ProfileSetArgs {
    /// Display name to store.
    #[arg(long)]
    pub name: Option<String>,
    /// Handle to store (without the `@`).
    #[arg(long)]
    pub handle: Option<String>,
    /// Alternative profile file location.
    #[arg(long)]
    pub profile: Option<PathBuf>,
}

/// Args for profile commands that only need the file location.
#[derive(Args, Debug)]
pub struct ProfileLocationArgs {
    /// Alternative profile file location.
    #[arg(long)]
    pub profile: Option<PathBuf>,
}

/// Execute a profile command.
pub fn handle(command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::Set(args) => set(args),
        ProfileCommand::Show(args) => show(args),
        ProfileCommand::Clear(args) => clear(args),
    }
}

fn resolve_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path),
        None => default_profile_path(),
    }
}

fn set(args: ProfileSetArgs) -> Result<()> {
    if args.name.is_none() && args.handle.is_none() {
        return Err(anyhow!("nothing to store; pass --name and/or --handle"));
    }
    let path = resolve_path(args.profile)?;
    let mut profile = Profile::load(&path)?;
    if profile.remember(args.name.as_deref(), args.handle.as_deref()) {
        profile.save(&path)?;
        println!("Stored profile in {}", path.display());
    } else {
        println!("Profile already up to date");
    }
    Ok(())
}

fn show(args: ProfileLocationArgs) -> Result<()> {
    let path = resolve_path(args.profile)?;
    let profile = Profile::load(&path)?;
    println!("Name:    {}", profile.name.as_deref().unwrap_or("(none)"));
    match profile.handle.as_deref() {
        Some(handle) => println!("Handle:  @{handle}"),
        None => println!("Handle:  (none)"),
    }
    if let Some(updated) = profile.updated_at {
        println!("Updated: {updated}");
    }
    Ok(())
}

fn clear(args: ProfileLocationArgs) -> Result<()> {
    let path = resolve_path(args.profile)?;
    if path.exists() {
        fs::remove_file(&path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
        println!("Removed {}", path.display());
    } else {
        println!("No stored profile at {}", path.display());
    }
    Ok(())
}
