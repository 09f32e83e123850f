//! # Configuration Module
//!
//! Resolves where the catalog file lives. There is exactly one setting, the
//! catalog path, and it is built once in `main` and handed to
//! [`crate::library::Library::open`].
//!
//! ## Data Storage
//!
//! By default the catalog is `song_list.json` in the user's home directory:
//! - Linux: `/home/<user>/song_list.json`
//! - macOS: `/Users/<user>/song_list.json`
//! - Windows: `C:\Users\<user>\song_list.json`
//!
//! When no home directory can be determined the working directory is used.

use anyhow::{Context, Result};
use log::{debug, warn};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

use crate::store::CATALOG_FILE_NAME;

/// Returns the default catalog file path.
///
/// # Examples
///
/// ```no_run
/// use moodify::config::default_catalog_path;
///
/// let path = default_catalog_path()?;
/// println!("Catalog location: {}", path.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Only fails when the home directory is unknown *and* the working directory
/// cannot be read.
pub fn default_catalog_path() -> Result<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(CATALOG_FILE_NAME));
    }

    warn!("Could not determine home directory, using the working directory");
    let cwd = std::env::current_dir()
        .context("Could not determine home or working directory for the catalog file")?;
    Ok(cwd.join(CATALOG_FILE_NAME))
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the catalog JSON file
    pub catalog_path: PathBuf,
}

impl Config {
    /// Configuration with the default catalog location.
    pub fn new() -> Result<Self> {
        Ok(Self {
            catalog_path: default_catalog_path()?,
        })
    }

    /// Configuration with an explicit catalog path, made absolute against
    /// the working directory.
    pub fn with_catalog_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let absolute = path
            .absolutize()
            .with_context(|| format!("Failed to resolve catalog path {}", path.display()))?;
        debug!("Catalog path {} resolved to {}", path.display(), absolute.display());
        Ok(Self {
            catalog_path: absolute.into_owned(),
        })
    }

    /// Explicit path if given, default location otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::with_catalog_path(path),
            None => Self::new(),
        }
    }
}
