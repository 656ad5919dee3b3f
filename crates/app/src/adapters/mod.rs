pub mod persistence;
pub mod settings;
pub mod source;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Default per-installation data directory (cache, favorites, history,
/// settings all live here).
pub fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from("", "", "cinedex").context("Failed to determine project directories")?;
    Ok(proj_dirs.data_dir().to_path_buf())
}
