//! The catalog together with its backing file.
//!
//! [`Library`] is the single place business rules live: validation and
//! duplicate checks come from [`Catalog`], and every successful mutation is
//! followed by a full save. If the save fails the mutation is undone, so the
//! in-memory catalog never drifts from what is on disk.

use log::{error, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, Song};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::mood::Mood;
use crate::store::CatalogStore;

/// How the catalog came to be at startup.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Read from an existing file
    Loaded { songs: usize },
    /// No file yet; started empty
    Created,
    /// The file could not be read; started empty. The unreadable file was
    /// moved to `backup` when possible.
    Recovered { error: Error, backup: Option<PathBuf> },
}

#[derive(Debug)]
pub struct Library {
    catalog: Catalog,
    store: CatalogStore,
    /// Something unreadable is still at the path; never save over it.
    protected: bool,
}

impl Library {
    /// Open the catalog named by `config`.
    pub fn open(config: &Config) -> (Self, LoadOutcome) {
        Self::with_store(CatalogStore::new(&config.catalog_path))
    }

    /// Load through `store`. Never fails: an unreadable file yields an empty
    /// catalog and a [`LoadOutcome::Recovered`] for the caller to report.
    ///
    /// A corrupt file is moved to a backup first. Anything that cannot be
    /// moved aside (a directory, a file we may not read) stays in place and
    /// the library refuses to save over it.
    pub fn with_store(store: CatalogStore) -> (Self, LoadOutcome) {
        let (catalog, outcome) = match store.read() {
            Ok(Some(catalog)) => {
                let songs = catalog.len();
                (catalog, LoadOutcome::Loaded { songs })
            }
            Ok(None) => {
                info!("Starting a new catalog at {}", store.path().display());
                (Catalog::new(), LoadOutcome::Created)
            }
            Err(err) => {
                error!("{err}");
                let backup = store
                    .backup_unreadable()
                    .map_err(|backup_err| warn!("Could not back up unreadable catalog: {backup_err}"))
                    .ok();
                (Catalog::new(), LoadOutcome::Recovered { error: err, backup })
            }
        };
        let protected = matches!(outcome, LoadOutcome::Recovered { backup: None, .. })
            && fs::symlink_metadata(store.path()).is_ok();
        if protected {
            warn!("Leaving {} untouched; changes will not be saved", store.path().display());
        }
        (
            Self {
                catalog,
                store,
                protected,
            },
            outcome,
        )
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Songs under `mood`, or `None` if it has none.
    pub fn list(&self, mood: Mood) -> Option<&[Song]> {
        self.catalog.list(mood)
    }

    /// A random song from `mood`, or `None` if it has none.
    pub fn pick_random(&self, mood: Mood) -> Option<&Song> {
        self.catalog.pick_random(mood, &mut rand::thread_rng())
    }

    /// Add a song and save.
    ///
    /// # Errors
    ///
    /// Validation and duplicate errors from [`Catalog::add`], or
    /// [`Error::Persistence`] if the save failed (the song is not kept).
    pub fn add(&mut self, mood: Mood, title: &str, artist: &str) -> Result<Song> {
        let song = self.catalog.add(mood, title, artist)?.clone();
        if let Err(err) = self.save() {
            self.catalog.pop(mood);
            return Err(err);
        }
        info!("Added `{song}' to {mood}");
        Ok(song)
    }

    /// Delete the song at 1-based `position` and save.
    ///
    /// # Errors
    ///
    /// [`Error::Range`] for a bad position, or [`Error::Persistence`] if the
    /// save failed (the song is restored).
    pub fn delete_at(&mut self, mood: Mood, position: usize) -> Result<Song> {
        let song = self.catalog.delete_at(mood, position)?;
        if let Err(err) = self.save() {
            self.catalog.insert_at(mood, position, song);
            return Err(err);
        }
        info!("Deleted `{song}' from {mood}");
        Ok(song)
    }

    fn save(&self) -> Result<()> {
        if self.protected {
            let refused = io::Error::new(
                io::ErrorKind::PermissionDenied,
                "the existing catalog could not be read, so it will not be overwritten",
            );
            return Err(Error::persistence(self.path(), refused));
        }
        self.store.save(&self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_in(dir: &TempDir) -> (Library, LoadOutcome) {
        Library::with_store(CatalogStore::new(dir.path().join("song_list.json")))
    }

    #[test]
    fn test_open_missing_file_is_created_outcome() {
        let dir = TempDir::new().unwrap();
        let (library, outcome) = open_in(&dir);
        assert!(matches!(outcome, LoadOutcome::Created));
        assert!(library.catalog().is_empty());
    }

    #[test]
    fn test_add_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let (mut library, _) = open_in(&dir);
        library.add(Mood::Happy, "Here Comes the Sun", "The Beatles").unwrap();

        let (reopened, outcome) = open_in(&dir);
        assert!(matches!(outcome, LoadOutcome::Loaded { songs: 1 }));
        assert_eq!(reopened.catalog(), library.catalog());
    }

    #[test]
    fn test_rejected_add_does_not_touch_disk() {
        let dir = TempDir::new().unwrap();
        let (mut library, _) = open_in(&dir);
        assert!(library.add(Mood::Sad, "", "Nobody").is_err());
        assert!(!library.path().exists());
    }

    #[test]
    fn test_delete_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let (mut library, _) = open_in(&dir);
        library.add(Mood::Energetic, "Thunderstruck", "AC/DC").unwrap();
        library.add(Mood::Energetic, "Eye of the Tiger", "Survivor").unwrap();

        let removed = library.delete_at(Mood::Energetic, 1).unwrap();
        assert_eq!(removed.title, "Thunderstruck");

        let (reopened, _) = open_in(&dir);
        assert_eq!(
            reopened.list(Mood::Energetic).unwrap(),
            &[Song::new("Eye of the Tiger", "Survivor")]
        );
    }

    #[test]
    fn test_failed_save_rolls_back_add() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let (mut library, _) = Library::with_store(CatalogStore::new(blocker.join("song_list.json")));

        let err = library.add(Mood::Happy, "Song", "Artist").unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
        assert!(library.list(Mood::Happy).is_none());
    }

    #[test]
    fn test_failed_save_rolls_back_delete() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        let (mut library, _) = Library::with_store(CatalogStore::new(nested.join("song_list.json")));
        library.add(Mood::Sad, "One", "A").unwrap();
        library.add(Mood::Sad, "Two", "B").unwrap();

        // Replace the directory with a file so the next save cannot succeed
        fs::remove_dir_all(&nested).unwrap();
        fs::write(&nested, "").unwrap();

        assert!(library.delete_at(Mood::Sad, 1).is_err());
        let titles: Vec<_> = library.catalog().songs(Mood::Sad).iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["One", "Two"]);
    }

    #[test]
    fn test_unreadable_file_recovers_with_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("song_list.json");
        fs::write(&path, "{ broken").unwrap();

        let (mut library, outcome) = open_in(&dir);
        let LoadOutcome::Recovered { backup: Some(backup), .. } = outcome else {
            panic!("expected recovery with backup, got {outcome:?}");
        };
        assert!(library.catalog().is_empty());
        assert_eq!(fs::read_to_string(&backup).unwrap(), "{ broken");

        // Later saves leave the backup untouched
        library.add(Mood::Angry, "Killing in the Name", "Rage Against the Machine").unwrap();
        assert_eq!(fs::read_to_string(&backup).unwrap(), "{ broken");
    }

    #[test]
    fn test_pick_random_from_library() {
        let dir = TempDir::new().unwrap();
        let (mut library, _) = open_in(&dir);
        assert!(library.pick_random(Mood::Relaxed).is_none());
        library.add(Mood::Relaxed, "Weightless", "Marconi Union").unwrap();
        for _ in 0..20 {
            assert_eq!(library.pick_random(Mood::Relaxed).unwrap().title, "Weightless");
        }
    }

    #[test]
    fn test_directory_path_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let music = dir.path().join("music");
        fs::create_dir(&music).unwrap();
        fs::write(music.join("precious.flac"), "audio").unwrap();

        let (mut library, outcome) = Library::with_store(CatalogStore::new(&music));
        assert!(matches!(outcome, LoadOutcome::Recovered { backup: None, .. }));

        let err = library.add(Mood::Happy, "Song", "Artist").unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
        assert!(library.catalog().is_empty());

        assert!(music.is_dir());
        assert_eq!(fs::read_to_string(music.join("precious.flac")).unwrap(), "audio");
        assert!(!dir.path().join("music.bak").exists());
    }

    #[test]
    fn test_repeated_corruption_keeps_every_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("song_list.json");

        fs::write(&path, "first corrupt copy").unwrap();
        let (mut library, _) = open_in(&dir);
        library.add(Mood::Happy, "Song", "Artist").unwrap();

        fs::write(&path, "second corrupt copy").unwrap();
        let (_, outcome) = open_in(&dir);
        let LoadOutcome::Recovered { backup: Some(second), .. } = outcome else {
            panic!("expected recovery with backup, got {outcome:?}");
        };

        assert_eq!(fs::read_to_string(dir.path().join("song_list.json.bak")).unwrap(), "first corrupt copy");
        assert_eq!(fs::read_to_string(second).unwrap(), "second corrupt copy");
    }
}
