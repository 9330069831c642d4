//! Common paths for SmAnime data storage
//!
//! Everything lives under ~/.config/smanime/ on all platforms:
//! - config.toml - User configuration
//! - favorites.sqlite - Favorites database
//! - smanime.log - TUI log output

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the SmAnime data directory (~/.config/smanime/)
pub fn smanime_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".config").join("smanime");
    fs::create_dir_all(&dir).context("Failed to create smanime directory")?;
    Ok(dir)
}

/// Get the config file path (~/.config/smanime/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(smanime_dir()?.join("config.toml"))
}

/// Get the database file path (~/.config/smanime/favorites.sqlite)
pub fn database_path() -> Result<PathBuf> {
    Ok(smanime_dir()?.join("favorites.sqlite"))
}

/// Get the log file path (~/.config/smanime/smanime.log)
pub fn log_path() -> Result<PathBuf> {
    Ok(smanime_dir()?.join("smanime.log"))
}
