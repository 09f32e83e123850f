//! Error types for catalog operations.
//!
//! Every failure a front end has to react to is one variant of [`Error`].
//! Front ends decide locally whether to re-prompt (input format and range
//! errors during menu navigation) or abort the current flow (validation,
//! duplicate and persistence errors).

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::mood::Mood;

/// Required song fields that may be rejected as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Artist,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Title => f.write_str("Title"),
            Field::Artist => f.write_str("Artist"),
        }
    }
}

/// Main error type for Moodify
#[derive(Error, Debug)]
pub enum Error {
    /// A required field was empty after trimming
    #[error("{0} cannot be empty.")]
    Validation(Field),

    /// The song is already catalogued under this mood
    #[error("'{title}' by {artist} already exists in the {mood} category.")]
    Duplicate {
        mood: Mood,
        title: String,
        artist: String,
    },

    /// A 1-based selection outside `1..=max`
    #[error("Invalid choice. Enter a number between 1 and {max}.")]
    Range { position: usize, max: usize },

    /// Reading, parsing or writing the catalog file failed
    #[error("Error accessing {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Non-numeric input where a number is required
    #[error("Invalid input {0:?}. Please write a number.")]
    InputFormat(String),
}

impl Error {
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: impl Into<io::Error>) -> Self {
        Error::Persistence {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
