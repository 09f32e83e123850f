//! The fixed set of moods songs are filed under.
//!
//! Moods have a stable display order and a 1-based key used by numbered
//! menus. The lowercase label doubles as the JSON key in the catalog file.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Relaxed,
    Energetic,
    Romantic,
    Angry,
}

impl Mood {
    /// All moods in display order.
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Relaxed,
        Mood::Energetic,
        Mood::Romantic,
        Mood::Angry,
    ];

    /// Number of moods, and so the highest menu key.
    pub const COUNT: usize = Self::ALL.len();

    /// Map a 1-based menu key to a mood.
    #[must_use]
    pub fn from_key(key: usize) -> Option<Mood> {
        key.checked_sub(1).and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// 1-based menu key.
    #[must_use]
    pub fn key(self) -> usize {
        self as usize + 1
    }

    /// Lowercase label, as stored in the catalog file.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Relaxed => "relaxed",
            Mood::Energetic => "energetic",
            Mood::Romantic => "romantic",
            Mood::Angry => "angry",
        }
    }

    /// Capitalized label for menus and dialog titles.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Relaxed => "Relaxed",
            Mood::Energetic => "Energetic",
            Mood::Romantic => "Romantic",
            Mood::Angry => "Angry",
        }
    }

    /// `(key, mood)` pairs in display order, for rendering menus.
    pub fn menu() -> impl Iterator<Item = (usize, Mood)> {
        Self::ALL.into_iter().map(|mood| (mood.key(), mood))
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
