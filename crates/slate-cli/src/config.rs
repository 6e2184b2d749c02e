//! Data directory resolution.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// Environment variable overriding the default data directory.
pub const DATA_DIR_ENV: &str = "SLATE_DATA_DIR";

/// Resolve the directory holding the record files.
///
/// Precedence: the `--data-dir` flag, then `SLATE_DATA_DIR`, then the
/// platform data directory.
pub fn data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match flag {
        Some(dir) => dir,
        None => match std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("", "", "slate")
                .context("Could not determine data directory")?
                .data_dir()
                .to_path_buf(),
        },
    };

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory {}", dir.display()))?;

    Ok(dir)
}
