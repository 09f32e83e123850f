//! Whole-file JSON persistence for the catalog.
//!
//! The catalog is always read and written as one document. Saves go through
//! a temporary file in the target's directory that is then renamed over the
//! target, so a failed save leaves the previous document intact.

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::catalog::Catalog;
use crate::error::{Error, Result};

/// Default catalog file name.
pub const CATALOG_FILE_NAME: &str = "song_list.json";

const INDENT: &[u8] = b"    ";

/// Reads and writes a [`Catalog`] at a fixed path.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the catalog, or `None` if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// [`Error::Persistence`] when the file exists but cannot be read or
    /// parsed.
    pub fn read(&self) -> Result<Option<Catalog>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No catalog at {}", self.path.display());
                return Ok(None);
            }
            Err(err) => return Err(Error::persistence(&self.path, err)),
        };

        let catalog: Catalog =
            serde_json::from_str(&text).map_err(|err| Error::persistence(&self.path, err))?;
        info!("Loaded {} songs from {}", catalog.len(), self.path.display());
        Ok(Some(catalog))
    }

    /// Read the catalog, falling back to an empty one when the file is missing.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogStore::read`].
    pub fn load(&self) -> Result<Catalog> {
        Ok(self.read()?.unwrap_or_default())
    }

    /// Overwrite the backing file with `catalog`, indented for humans.
    ///
    /// # Errors
    ///
    /// [`Error::Persistence`] if the path exists but is not a regular file,
    /// the directory cannot be created, or the temporary file cannot be
    /// written or renamed into place.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        if let Ok(meta) = fs::metadata(&self.path) {
            if !meta.is_file() {
                return Err(Error::persistence(&self.path, not_a_file()));
            }
        }
        let dir = self.dir();
        fs::create_dir_all(dir).map_err(|err| Error::persistence(dir, err))?;

        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        catalog
            .serialize(&mut ser)
            .map_err(|err| Error::persistence(&self.path, err))?;
        buf.push(b'\n');

        let mut tmp = NamedTempFile::new_in(dir).map_err(|err| Error::persistence(dir, err))?;
        tmp.write_all(&buf)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|err| Error::persistence(tmp.path(), err))?;
        tmp.persist(&self.path)
            .map_err(|err| Error::persistence(&self.path, err.error))?;

        info!("Saved {} songs to {}", catalog.len(), self.path.display());
        Ok(())
    }

    /// Move a corrupt catalog file aside so a later save cannot overwrite
    /// it. Returns the backup path: `<file>.bak`, or `<file>.N.bak` when
    /// earlier backups are already there.
    ///
    /// Only a regular file whose bytes can be read is moved. Directories,
    /// special files and files we cannot read are left where they are.
    ///
    /// # Errors
    ///
    /// [`Error::Persistence`] if the path is not a readable regular file or
    /// the rename fails.
    pub fn backup_unreadable(&self) -> Result<PathBuf> {
        let meta = fs::metadata(&self.path).map_err(|err| Error::persistence(&self.path, err))?;
        if !meta.is_file() {
            return Err(Error::persistence(&self.path, not_a_file()));
        }
        fs::read(&self.path).map_err(|err| Error::persistence(&self.path, err))?;

        let backup = self.backup_path();
        fs::rename(&self.path, &backup).map_err(|err| Error::persistence(&self.path, err))?;
        warn!("Moved unreadable catalog {} to {}", self.path.display(), backup.display());
        Ok(backup)
    }

    /// First of `<file>.bak`, `<file>.1.bak`, `<file>.2.bak`, ... not yet taken.
    fn backup_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from(CATALOG_FILE_NAME), ToOwned::to_owned);
        (0u32..)
            .map(|n| {
                let mut candidate = name.clone();
                if n > 0 {
                    candidate.push(format!(".{n}"));
                }
                candidate.push(".bak");
                self.path.with_file_name(candidate)
            })
            .find(|candidate| fs::symlink_metadata(candidate).is_err())
            .unwrap_or_else(|| self.path.with_file_name(name))
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

fn not_a_file() -> io::Error {
    io::Error::other("not a regular file")
}
