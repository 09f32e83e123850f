//! Presentation adapters.
//!
//! Both front ends implement [`Interaction`]: render a menu, collect a
//! choice, show a result. The flows themselves live in [`crate::session`], so
//! the adapters never apply business rules of their own.

pub mod console;
pub mod tui;

use anyhow::Result;
use std::path::Path;

use crate::catalog::Song;
use crate::error::{self, Error, Field};
use crate::library::LoadOutcome;
use crate::mood::Mood;

/// Main menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    PickRandom,
    AddSong,
    ListSongs,
    DeleteSong,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::PickRandom,
        MenuAction::AddSong,
        MenuAction::ListSongs,
        MenuAction::DeleteSong,
        MenuAction::Exit,
    ];

    #[must_use]
    pub fn from_key(key: usize) -> Option<MenuAction> {
        key.checked_sub(1).and_then(|idx| Self::ALL.get(idx).copied())
    }

    #[must_use]
    pub fn key(self) -> usize {
        self as usize + 1
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::PickRandom => "Select Mood (Play Random Song)",
            MenuAction::AddSong => "Add New Songs",
            MenuAction::ListSongs => "List Songs by Mood",
            MenuAction::DeleteSong => "Delete a Song",
            MenuAction::Exit => "Exit",
        }
    }
}

/// What a mood is being picked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodPurpose {
    PickRandom,
    AddSong,
    ListSongs,
    DeleteSong,
}

impl MoodPurpose {
    /// Heading for the mood picker.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            MoodPurpose::PickRandom => "Select mood to play a random song",
            MoodPurpose::AddSong => "Select mood to add a new song",
            MoodPurpose::ListSongs => "Select mood to list songs from",
            MoodPurpose::DeleteSong => "Select mood to delete a song from",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// A titled message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Level::Info, title, body)
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Level::Warning, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Level::Error, title, body)
    }

    fn new(level: Level, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// What a front end has to provide to drive a session.
///
/// `Ok(None)` from a prompt means the user cancelled (closed the dialog, or
/// input ended). `Err` is reserved for terminal/IO failures.
pub trait Interaction {
    /// Report how the catalog was loaded at startup.
    fn loaded(&mut self, path: &Path, outcome: &LoadOutcome) -> Result<()>;

    /// Show the main menu until a valid entry is chosen.
    /// End of input counts as [`MenuAction::Exit`].
    fn main_menu(&mut self) -> Result<MenuAction>;

    /// Let the user pick one of the six moods.
    fn choose_mood(&mut self, purpose: MoodPurpose) -> Result<Option<Mood>>;

    /// Collect free text for a song field.
    fn ask_text(&mut self, field: Field) -> Result<Option<String>>;

    /// Show a numbered listing with its total.
    fn show_songs(&mut self, mood: Mood, songs: &[Song]) -> Result<()>;

    /// Let the user pick a 1-based position from `songs`.
    fn choose_position(&mut self, mood: Mood, songs: &[Song]) -> Result<Option<usize>>;

    /// Yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, question: &str) -> Result<bool>;

    fn notify(&mut self, notice: Notice) -> Result<()>;

    /// Called after every successful save.
    fn saved(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Parse a 1-based menu choice in `1..=max`.
///
/// # Errors
///
/// [`Error::InputFormat`] for non-numeric text, [`Error::Range`] for numbers
/// outside the menu.
pub fn parse_choice(input: &str, max: usize) -> error::Result<usize> {
    let input = input.trim();
    let choice: usize = input
        .parse()
        .map_err(|_| Error::InputFormat(input.to_string()))?;
    if (1..=max).contains(&choice) {
        Ok(choice)
    } else {
        Err(Error::Range {
            position: choice,
            max,
        })
    }
}

/// Parse a 1-based mood key.
///
/// # Errors
///
/// Same as [`parse_choice`].
pub fn parse_mood(input: &str) -> error::Result<Mood> {
    let key = parse_choice(input, Mood::COUNT)?;
    Mood::from_key(key).ok_or(Error::Range {
        position: key,
        max: Mood::COUNT,
    })
}

/// Prompt text for a song field.
pub(crate) fn field_prompt(field: Field) -> &'static str {
    match field {
        Field::Title => "Enter the title of the new song:",
        Field::Artist => "Enter the artist of the new song:",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_accepts_menu_range() {
        assert_eq!(parse_choice("1", 5).unwrap(), 1);
        assert_eq!(parse_choice(" 5\n", 5).unwrap(), 5);
    }

    #[test]
    fn test_parse_choice_rejects_text() {
        for input in ["", "abc", "1.5", "-1", "two"] {
            assert!(
                matches!(parse_choice(input, 6), Err(Error::InputFormat(_))),
                "{input:?} should be a format error"
            );
        }
    }

    #[test]
    fn test_parse_choice_rejects_out_of_range() {
        assert!(matches!(parse_choice("0", 6), Err(Error::Range { position: 0, max: 6 })));
        assert!(matches!(parse_choice("7", 6), Err(Error::Range { position: 7, max: 6 })));
    }

    #[test]
    fn test_parse_mood() {
        assert_eq!(parse_mood("4").unwrap(), Mood::Energetic);
        assert!(matches!(parse_mood("x"), Err(Error::InputFormat(_))));
        assert!(matches!(parse_mood("9"), Err(Error::Range { position: 9, max: 6 })));
    }

    #[test]
    fn test_menu_action_keys() {
        for action in MenuAction::ALL {
            assert_eq!(MenuAction::from_key(action.key()), Some(action));
        }
        assert_eq!(MenuAction::from_key(5), Some(MenuAction::Exit));
        assert_eq!(MenuAction::from_key(0), None);
        assert_eq!(MenuAction::from_key(6), None);
    }

    #[test]
    fn test_mood_purpose_headings_are_distinct() {
        let headings = [
            MoodPurpose::PickRandom.heading(),
            MoodPurpose::AddSong.heading(),
            MoodPurpose::ListSongs.heading(),
            MoodPurpose::DeleteSong.heading(),
        ];
        for (i, heading) in headings.iter().enumerate() {
            assert!(heading.starts_with("Select mood to"));
            assert!(!headings[i + 1..].contains(heading));
        }
    }
}
