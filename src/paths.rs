//! Common path utilities for the plugman directory structure.
//!
//! Centralizes `.plugman` path construction so the home-directory lookup
//! and the `--home` override logic live in one place.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Get the user's home directory or return an error.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow!("could not find home directory"))
}

/// Get `~/.plugman` — the default manager home directory.
pub fn plugman_dir() -> Result<PathBuf> {
    let dir = home_dir()?.join(".plugman");
    log::debug!("plugman dir: {:?}", dir);
    Ok(dir)
}

/// Catalog directory under a manager home.
pub fn catalog_dir(home: &Path) -> PathBuf {
    home.join("catalog")
}

/// Active directory under a manager home.
pub fn active_dir(home: &Path) -> PathBuf {
    home.join("active")
}

/// Config file under a manager home.
pub fn config_path(home: &Path) -> PathBuf {
    home.join("config.json")
}
