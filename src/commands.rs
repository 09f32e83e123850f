//! One-shot subcommands.
//!
//! Each function performs a single catalog operation and prints the result
//! through a [`Console`], so the wording matches the interactive session.
//! Catalog errors are returned to `main`, which prints them and exits
//! non-zero.

use anyhow::{anyhow, Result};
use std::io::{BufRead, Write};

use crate::error::Error;
use crate::library::Library;
use crate::mood::Mood;
use crate::ui::console::Console;
use crate::ui::Interaction;

pub fn add<R: BufRead, W: Write>(
    library: &mut Library,
    console: &mut Console<R, W>,
    mood: Mood,
    title: &str,
    artist: &str,
) -> Result<()> {
    let song = library.add(mood, title, artist)?;
    console.saved(library.path())?;
    console.say(format!("Added '{}' by {} to {mood} songs.", song.title, song.artist))?;
    Ok(())
}

pub fn list<R: BufRead, W: Write>(library: &Library, console: &mut Console<R, W>, mood: Mood) -> Result<()> {
    match library.list(mood) {
        Some(songs) => console.show_songs(mood, songs),
        None => Ok(console.say(format!("No songs in the '{mood}' category."))?),
    }
}

pub fn pick<R: BufRead, W: Write>(library: &Library, console: &mut Console<R, W>, mood: Mood) -> Result<()> {
    match library.pick_random(mood) {
        Some(song) => console.say(song)?,
        None => console.say(format!("No songs in the '{mood}' mood yet. Try adding one first."))?,
    }
    Ok(())
}

/// Delete the song at 1-based `position`, asking first unless `yes`.
pub fn delete<R: BufRead, W: Write>(
    library: &mut Library,
    console: &mut Console<R, W>,
    mood: Mood,
    position: usize,
    yes: bool,
) -> Result<()> {
    let songs = library
        .list(mood)
        .ok_or_else(|| anyhow!("No songs in the '{mood}' category to delete."))?;
    let song = position
        .checked_sub(1)
        .and_then(|idx| songs.get(idx))
        .cloned()
        .ok_or(Error::Range {
            position,
            max: songs.len(),
        })?;

    let question = format!("Are you sure you want to delete '{}' by {}?", song.title, song.artist);
    if !yes && !console.confirm(&question)? {
        console.say("Deletion cancelled.")?;
        return Ok(());
    }

    let removed = library.delete_at(mood, position)?;
    console.saved(library.path())?;
    console.say(format!(
        "Deleted '{}' by {} from {mood} songs.",
        removed.title, removed.artist
    ))?;
    Ok(())
}

/// Print every mood with its menu key and song count.
pub fn moods<R: BufRead, W: Write>(library: &Library, console: &mut Console<R, W>) -> Result<()> {
    for (key, mood) in Mood::menu() {
        let count = library.catalog().songs(mood).len();
        let noun = if count == 1 { "song" } else { "songs" };
        console.say(format!("{key}. {:<10} {count} {noun}", mood.display_name()))?;
    }
    Ok(())
}
