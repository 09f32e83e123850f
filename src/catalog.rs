//! In-memory song catalog: every mood mapped to an ordered list of songs.
//!
//! The catalog is plain data. It validates and mutates, but never touches the
//! disk; [`crate::library::Library`] pairs it with a store and saves after
//! every mutation.

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Field, Result};
use crate::mood::Mood;

/// A catalogued song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
}

impl Song {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Case-insensitive, whitespace-trimmed equality of `(title, artist)`.
    #[must_use]
    pub fn same_song(&self, other: &Song) -> bool {
        normalized(&self.title) == normalized(&other.title)
            && normalized(&self.artist) == normalized(&other.artist)
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.artist)
    }
}

fn normalized(text: &str) -> String {
    text.trim().to_lowercase()
}

/// True if `candidate` is already present in `songs`.
#[must_use]
pub fn song_exists(songs: &[Song], candidate: &Song) -> bool {
    songs.iter().any(|song| song.same_song(candidate))
}

/// Mood → songs, with every mood always present.
///
/// Deserialization fills in moods missing from the file, so a catalog loaded
/// from a hand-edited or partial document is still total.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<Mood, Vec<Song>>")]
pub struct Catalog {
    moods: BTreeMap<Mood, Vec<Song>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            moods: Mood::ALL.into_iter().map(|mood| (mood, Vec::new())).collect(),
        }
    }
}

impl From<BTreeMap<Mood, Vec<Song>>> for Catalog {
    fn from(mut moods: BTreeMap<Mood, Vec<Song>>) -> Self {
        for mood in Mood::ALL {
            moods.entry(mood).or_default();
        }
        Self { moods }
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.moods.serialize(serializer)
    }
}

impl Catalog {
    /// Empty catalog with all moods present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Songs filed under `mood`, in insertion order. Possibly empty.
    #[must_use]
    pub fn songs(&self, mood: Mood) -> &[Song] {
        self.moods.get(&mood).map_or(&[], Vec::as_slice)
    }

    fn songs_mut(&mut self, mood: Mood) -> &mut Vec<Song> {
        self.moods.entry(mood).or_default()
    }

    /// Songs under `mood`, or `None` when there are none.
    #[must_use]
    pub fn list(&self, mood: Mood) -> Option<&[Song]> {
        let songs = self.songs(mood);
        (!songs.is_empty()).then_some(songs)
    }

    /// Total number of songs across all moods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moods.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Trim, validate and append a song to `mood`.
    ///
    /// # Errors
    ///
    /// * [`Error::Validation`] if the title or artist is blank (title first)
    /// * [`Error::Duplicate`] if the mood already has this song
    pub fn add(&mut self, mood: Mood, title: &str, artist: &str) -> Result<&Song> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation(Field::Title));
        }
        let artist = artist.trim();
        if artist.is_empty() {
            return Err(Error::Validation(Field::Artist));
        }

        let song = Song::new(title, artist);
        let songs = self.songs_mut(mood);
        if song_exists(songs, &song) {
            debug!("Rejected duplicate `{song}' in {mood}");
            return Err(Error::Duplicate {
                mood,
                title: song.title,
                artist: song.artist,
            });
        }

        songs.push(song);
        trace!("{mood} now holds {} songs", songs.len());
        Ok(&songs[songs.len() - 1])
    }

    /// Remove the song at 1-based `position` under `mood`.
    ///
    /// # Errors
    ///
    /// [`Error::Range`] if `position` is outside `1..=len`; nothing is removed.
    pub fn delete_at(&mut self, mood: Mood, position: usize) -> Result<Song> {
        let songs = self.songs_mut(mood);
        if position == 0 || position > songs.len() {
            return Err(Error::Range {
                position,
                max: songs.len(),
            });
        }
        Ok(songs.remove(position - 1))
    }

    /// Put a song back at 1-based `position`. Used to undo a deletion whose
    /// save failed.
    pub(crate) fn insert_at(&mut self, mood: Mood, position: usize, song: Song) {
        let songs = self.songs_mut(mood);
        let idx = position.saturating_sub(1).min(songs.len());
        songs.insert(idx, song);
    }

    /// Drop the most recently added song under `mood`.
    pub(crate) fn pop(&mut self, mood: Mood) -> Option<Song> {
        self.songs_mut(mood).pop()
    }

    /// A uniformly random song from `mood`, or `None` if it has none.
    pub fn pick_random<R: Rng + ?Sized>(&self, mood: Mood, rng: &mut R) -> Option<&Song> {
        self.songs(mood).choose(rng)
    }
}
