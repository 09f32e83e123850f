//! Line-based console front end.
//!
//! Reads answers one line at a time and writes plain text. Generic over the
//! reader and writer so sessions can be scripted in tests.

use anyhow::Result;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::path::Path;

use super::{parse_choice, parse_mood, Interaction, MenuAction, MoodPurpose, Notice};
use crate::catalog::Song;
use crate::error::{Error, Field};
use crate::library::LoadOutcome;
use crate::mood::Mood;

const RULE: &str = "----------------";
const LISTING_RULE: &str = "---------------------------";

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, e.g. to inspect captured output.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Prompt and read one line without its line ending. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn print_mood_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "Select one of the following moods:")?;
        writeln!(self.output, "{RULE}")?;
        for (key, mood) in Mood::menu() {
            writeln!(self.output, "{key}. {}", mood.display_name())?;
        }
        writeln!(self.output, "{RULE}")
    }

    /// Numbered listing, without the trailing total.
    pub fn write_listing(&mut self, mood: Mood, songs: &[Song]) -> io::Result<()> {
        writeln!(self.output, "\nSongs in '{mood}' mood:")?;
        writeln!(self.output, "{LISTING_RULE}")?;
        for (i, song) in songs.iter().enumerate() {
            writeln!(self.output, "{}. {song}", i + 1)?;
        }
        Ok(())
    }

    /// Free-form line of output.
    pub fn say(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }
}

fn mood_prompt(purpose: MoodPurpose) -> String {
    let range = format!("(1-{})", Mood::COUNT);
    match purpose {
        MoodPurpose::ListSongs => format!("Select a mood to list songs from {range}: "),
        MoodPurpose::DeleteSong => format!("Select a mood to delete a song from {range}: "),
        MoodPurpose::PickRandom | MoodPurpose::AddSong => format!("Enter your choice {range}: "),
    }
}

fn text_prompt(field: Field) -> &'static str {
    match field {
        Field::Title => "Enter the title of the new song: ",
        Field::Artist => "Enter the artist: ",
    }
}

impl<R: BufRead, W: Write> Interaction for Console<R, W> {
    fn loaded(&mut self, path: &Path, outcome: &LoadOutcome) -> Result<()> {
        let path = path.display();
        match outcome {
            LoadOutcome::Loaded { .. } => self.say(format!("Loaded data from {path}."))?,
            LoadOutcome::Created => {
                self.say(format!("No saved data found in {path}. Creating new data."))?;
            }
            LoadOutcome::Recovered { error, backup } => {
                self.say(format!("Error loading {path}: {error}"))?;
                match backup {
                    Some(backup) => self.say(format!(
                        "Starting with an empty catalog. The unreadable file was kept as {}.",
                        backup.display()
                    ))?,
                    None => self.say("Starting with an empty catalog.")?,
                }
            }
        }
        Ok(())
    }

    fn main_menu(&mut self) -> Result<MenuAction> {
        let max = MenuAction::ALL.len();
        writeln!(self.output, "Welcome to Moodify!")?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "Select one of the following options:")?;
        for action in MenuAction::ALL {
            writeln!(self.output, "{}. {}", action.key(), action.label())?;
        }
        writeln!(self.output, "{RULE}")?;

        loop {
            let Some(line) = self.read_line(&format!("Enter your choice (1-{max}): "))? else {
                return Ok(MenuAction::Exit);
            };
            match parse_choice(&line, max).ok().and_then(MenuAction::from_key) {
                Some(MenuAction::Exit) => {
                    self.say("Exiting...")?;
                    return Ok(MenuAction::Exit);
                }
                Some(action) => return Ok(action),
                None => self.say(format!("Invalid choice. Please write a number 1-{max}."))?,
            }
        }
    }

    fn choose_mood(&mut self, purpose: MoodPurpose) -> Result<Option<Mood>> {
        self.print_mood_menu()?;
        let prompt = mood_prompt(purpose);
        loop {
            let Some(line) = self.read_line(&prompt)? else {
                return Ok(None);
            };
            match parse_mood(&line) {
                Ok(mood) => return Ok(Some(mood)),
                Err(_) => self.say(format!("Invalid choice. Please write a number 1-{}.", Mood::COUNT))?,
            }
        }
    }

    fn ask_text(&mut self, field: Field) -> Result<Option<String>> {
        Ok(self.read_line(text_prompt(field))?)
    }

    fn show_songs(&mut self, mood: Mood, songs: &[Song]) -> Result<()> {
        self.write_listing(mood, songs)?;
        self.say(format!("\nTotal songs in '{mood}': {}\n", songs.len()))?;
        Ok(())
    }

    fn choose_position(&mut self, mood: Mood, songs: &[Song]) -> Result<Option<usize>> {
        self.write_listing(mood, songs)?;
        let prompt = format!(
            "Enter the number of the song to delete (1-{}) or 'c' to cancel: ",
            songs.len()
        );
        loop {
            let Some(line) = self.read_line(&prompt)? else {
                return Ok(None);
            };
            let answer = line.trim();
            if answer.is_empty() || answer.eq_ignore_ascii_case("c") {
                return Ok(None);
            }
            match parse_choice(answer, songs.len()) {
                Ok(position) => return Ok(Some(position)),
                Err(Error::InputFormat(_)) => {
                    self.say("Invalid input. Enter a number or 'c' to cancel.")?;
                }
                Err(err) => self.say(err)?,
            }
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{question} (y/n): "))?;
        Ok(answer.is_some_and(|a| matches!(a.trim().to_lowercase().as_str(), "y" | "yes")))
    }

    fn notify(&mut self, notice: Notice) -> Result<()> {
        self.say(notice.body)?;
        Ok(())
    }

    fn saved(&mut self, path: &Path) -> Result<()> {
        self.say(format!("{} saved successfully.", path.display()))?;
        Ok(())
    }
}
