//! The interactive session shared by both front ends.
//!
//! ```text
//! MainMenu -> { PickRandom | AddSong | ListSongs | DeleteSong } -> MainMenu
//! MainMenu -> Exit
//! ```
//!
//! Every flow either completes or is abandoned before any mutation. Errors
//! from the catalog are shown to the user and return control to the main
//! menu; only terminal/IO failures of the front end itself propagate.

use anyhow::Result;
use log::debug;

use crate::error::{Error, Field};
use crate::library::{LoadOutcome, Library};
use crate::ui::{Interaction, MenuAction, MoodPurpose, Notice};

/// Run a session until the user exits.
pub fn run<I: Interaction + ?Sized>(library: &mut Library, outcome: &LoadOutcome, ui: &mut I) -> Result<()> {
    ui.loaded(library.path(), outcome)?;

    loop {
        let action = ui.main_menu()?;
        debug!("Main menu: {action:?}");
        match action {
            MenuAction::PickRandom => pick_random(library, ui)?,
            MenuAction::AddSong => add_song(library, ui)?,
            MenuAction::ListSongs => list_songs(library, ui)?,
            MenuAction::DeleteSong => delete_song(library, ui)?,
            MenuAction::Exit => return Ok(()),
        }
    }
}

fn pick_random<I: Interaction + ?Sized>(library: &Library, ui: &mut I) -> Result<()> {
    let Some(mood) = ui.choose_mood(MoodPurpose::PickRandom)? else {
        return Ok(());
    };

    match library.pick_random(mood) {
        Some(song) => ui.notify(Notice::info(
            "Random Song",
            format!("Here's a random {mood} song:\n\n{song}"),
        )),
        None => ui.notify(Notice::info(
            "No songs",
            format!("No songs in the '{mood}' mood yet. Try adding one first."),
        )),
    }
}

fn add_song<I: Interaction + ?Sized>(library: &mut Library, ui: &mut I) -> Result<()> {
    let Some(mood) = ui.choose_mood(MoodPurpose::AddSong)? else {
        return Ok(());
    };

    // Blank or closed prompts abort right away, before asking for the next one
    let Some(title) = ask_required(ui, Field::Title)? else {
        return Ok(());
    };
    let Some(artist) = ask_required(ui, Field::Artist)? else {
        return Ok(());
    };

    match library.add(mood, &title, &artist) {
        Ok(song) => {
            ui.saved(library.path())?;
            ui.notify(Notice::info(
                "Song Added",
                format!("Added '{}' by {} to {mood} songs.", song.title, song.artist),
            ))
        }
        Err(err) => report(ui, &err),
    }
}

fn ask_required<I: Interaction + ?Sized>(ui: &mut I, field: Field) -> Result<Option<String>> {
    let Some(text) = ui.ask_text(field)? else {
        return Ok(None);
    };
    if text.trim().is_empty() {
        report(ui, &Error::Validation(field))?;
        return Ok(None);
    }
    Ok(Some(text))
}

fn list_songs<I: Interaction + ?Sized>(library: &Library, ui: &mut I) -> Result<()> {
    let Some(mood) = ui.choose_mood(MoodPurpose::ListSongs)? else {
        return Ok(());
    };

    match library.list(mood) {
        Some(songs) => ui.show_songs(mood, songs),
        None => ui.notify(Notice::info(
            "No songs",
            format!("No songs in the '{mood}' category."),
        )),
    }
}

fn delete_song<I: Interaction + ?Sized>(library: &mut Library, ui: &mut I) -> Result<()> {
    let Some(mood) = ui.choose_mood(MoodPurpose::DeleteSong)? else {
        return Ok(());
    };
    let Some(songs) = library.list(mood) else {
        return ui.notify(Notice::info(
            "No songs",
            format!("No songs in the '{mood}' category to delete."),
        ));
    };

    let Some(position) = ui.choose_position(mood, songs)? else {
        return cancelled(ui);
    };
    let Some(song) = position.checked_sub(1).and_then(|idx| songs.get(idx)).cloned() else {
        return report(ui, &Error::Range { position, max: songs.len() });
    };

    let question = format!("Are you sure you want to delete '{}' by {}?", song.title, song.artist);
    if !ui.confirm(&question)? {
        return cancelled(ui);
    }

    match library.delete_at(mood, position) {
        Ok(removed) => {
            ui.saved(library.path())?;
            ui.notify(Notice::info(
                "Deleted",
                format!("Deleted '{}' by {} from {mood} songs.", removed.title, removed.artist),
            ))
        }
        Err(err) => report(ui, &err),
    }
}

fn cancelled<I: Interaction + ?Sized>(ui: &mut I) -> Result<()> {
    ui.notify(Notice::info("Cancelled", "Deletion cancelled."))
}

/// Show a catalog error with the dialog title each kind gets.
fn report<I: Interaction + ?Sized>(ui: &mut I, err: &Error) -> Result<()> {
    let notice = match err {
        Error::Validation(_) | Error::InputFormat(_) | Error::Range { .. } => {
            Notice::warning("Input Error", err.to_string())
        }
        Error::Duplicate { .. } => {
            Notice::info("Duplicate", "This song already exists in that category.")
        }
        Error::Persistence { .. } => Notice::error("Save Error", err.to_string()),
    };
    ui.notify(notice)
}
