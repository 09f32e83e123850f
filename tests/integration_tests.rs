//! # Integration Tests for Moodify
//!
//! End-to-end tests through the public library API, scripted console
//! sessions, and the compiled `moodify` binary.

use anyhow::Result;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

use moodify::catalog::Song;
use moodify::library::{Library, LoadOutcome};
use moodify::mood::Mood;
use moodify::store::CatalogStore;

fn catalog_path(dir: &TempDir) -> PathBuf {
    dir.path().join("song_list.json")
}

fn open(path: &Path) -> (Library, LoadOutcome) {
    Library::with_store(CatalogStore::new(path))
}

#[cfg(test)]
mod catalog_scenarios {
    use super::*;

    #[test]
    fn test_add_survives_reload() -> Result<()> {
        let dir = TempDir::new()?;
        let path = catalog_path(&dir);

        let (mut library, outcome) = open(&path);
        assert!(matches!(outcome, LoadOutcome::Created));
        library.add(Mood::Happy, "Here Comes the Sun", "The Beatles")?;

        let (reloaded, outcome) = open(&path);
        assert!(matches!(outcome, LoadOutcome::Loaded { songs: 1 }));
        assert_eq!(
            reloaded.list(Mood::Happy).unwrap(),
            &[Song::new("Here Comes the Sun", "The Beatles")]
        );
        for mood in Mood::ALL.into_iter().filter(|m| *m != Mood::Happy) {
            assert!(reloaded.list(mood).is_none(), "{mood} should be empty");
        }
        Ok(())
    }

    #[test]
    fn test_duplicate_in_same_mood_is_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let (mut library, _) = open(&catalog_path(&dir));

        library.add(Mood::Sad, "Hurt", "Johnny Cash")?;
        assert!(library.add(Mood::Sad, "Hurt", "Johnny Cash").is_err());
        assert_eq!(library.list(Mood::Sad).unwrap().len(), 1);

        // Same song is fine under another mood
        library.add(Mood::Relaxed, "Hurt", "Johnny Cash")?;
        Ok(())
    }

    #[test]
    fn test_delete_shifts_later_songs_down() -> Result<()> {
        let dir = TempDir::new()?;
        let path = catalog_path(&dir);
        let (mut library, _) = open(&path);
        library.add(Mood::Energetic, "Thunderstruck", "AC/DC")?;
        library.add(Mood::Energetic, "Eye of the Tiger", "Survivor")?;

        library.delete_at(Mood::Energetic, 1)?;

        let (reloaded, _) = open(&path);
        assert_eq!(
            reloaded.list(Mood::Energetic).unwrap(),
            &[Song::new("Eye of the Tiger", "Survivor")]
        );
        Ok(())
    }

    #[test]
    fn test_file_format_is_indented_mood_map() -> Result<()> {
        let dir = TempDir::new()?;
        let path = catalog_path(&dir);
        let (mut library, _) = open(&path);
        library.add(Mood::Romantic, "At Last", "Etta James")?;

        let text = fs::read_to_string(&path)?;
        assert!(text.contains("    \"romantic\": [\n        {\n            \"title\": \"At Last\","));

        let value: serde_json::Value = serde_json::from_str(&text)?;
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["angry", "energetic", "happy", "relaxed", "romantic", "sad"]);
        Ok(())
    }

    #[test]
    fn test_partial_file_gets_missing_moods() -> Result<()> {
        let dir = TempDir::new()?;
        let path = catalog_path(&dir);
        fs::write(&path, r#"{"sad": [{"title": "Hurt", "artist": "Johnny Cash"}]}"#)?;

        let (library, outcome) = open(&path);
        assert!(matches!(outcome, LoadOutcome::Loaded { songs: 1 }));
        assert_eq!(library.list(Mood::Sad).unwrap().len(), 1);
        assert!(library.list(Mood::Happy).is_none());
        Ok(())
    }

    #[test]
    fn test_corrupt_file_is_backed_up_not_overwritten() -> Result<()> {
        let dir = TempDir::new()?;
        let path = catalog_path(&dir);
        fs::write(&path, "[1, 2, 3]")?;

        let (mut library, outcome) = open(&path);
        assert!(matches!(outcome, LoadOutcome::Recovered { backup: Some(_), .. }));
        library.add(Mood::Angry, "Killing in the Name", "Rage Against the Machine")?;

        assert_eq!(fs::read_to_string(dir.path().join("song_list.json.bak"))?, "[1, 2, 3]");
        let (reloaded, _) = open(&path);
        assert_eq!(reloaded.catalog().len(), 1);
        Ok(())
    }
}

#[cfg(test)]
mod console_sessions {
    use super::*;
    use moodify::session;
    use moodify::ui::console::Console;

    fn run(path: &Path, script: &str) -> Result<String> {
        let (mut library, outcome) = open(path);
        let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        session::run(&mut library, &outcome, &mut console)?;
        Ok(String::from_utf8(console.into_output())?)
    }

    #[test]
    fn test_sessions_share_the_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = catalog_path(&dir);

        let first = run(&path, "2\n3\nWeightless\nMarconi Union\n5\n")?;
        assert!(first.contains("No saved data found in"));

        let second = run(&path, "3\n3\n5\n")?;
        assert!(second.contains("Loaded data from"));
        assert!(second.contains("1. Weightless by Marconi Union"));
        Ok(())
    }

    #[test]
    fn test_duplicate_message_in_console() -> Result<()> {
        let dir = TempDir::new()?;
        let output = run(
            &catalog_path(&dir),
            "2\n2\nHurt\nJohnny Cash\n2\n2\nhurt\nJOHNNY CASH\n5\n",
        )?;
        assert!(output.contains("This song already exists in that category."));
        Ok(())
    }

    #[test]
    fn test_cancelled_delete_keeps_song() -> Result<()> {
        let dir = TempDir::new()?;
        let path = catalog_path(&dir);
        let output = run(&path, "2\n5\nAt Last\nEtta James\n4\n5\nc\n4\n5\n1\nn\n5\n")?;

        assert_eq!(output.matches("Deletion cancelled.").count(), 2);
        let (library, _) = open(&path);
        assert_eq!(library.list(Mood::Romantic).unwrap().len(), 1);
        Ok(())
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    fn moodify(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_moodify"))
            .args(args)
            .output()
            .expect("Failed to run moodify")
    }

    fn moodify_with_file(path: &Path, args: &[&str]) -> Output {
        let mut full = vec!["--file", path.to_str().unwrap()];
        full.extend_from_slice(args);
        moodify(&full)
    }

    #[test]
    fn test_cli_help_displays_correctly() {
        let output = moodify(&["--help"]);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());
        for word in ["moodify", "console", "tui", "add", "list", "pick", "delete", "--file"] {
            assert!(stdout.contains(word), "help is missing {word}");
        }
    }

    #[test]
    fn test_cli_version_flag() {
        let output = moodify(&["--version"]);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("moodify"));
        assert!(stdout.contains("1.0.0"));
    }

    #[test]
    fn test_completion_generation() {
        let output = moodify(&["completion", "bash"]);
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("_moodify"));
        assert!(stdout.contains("complete"));
    }

    #[test]
    fn test_add_list_and_delete() -> Result<()> {
        let dir = TempDir::new()?;
        let path = catalog_path(&dir);

        let output = moodify_with_file(&path, &["add", "Happy", "Here Comes the Sun", "The Beatles"]);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(path.exists());

        let output = moodify_with_file(&path, &["list", "happy"]);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("1. Here Comes the Sun by The Beatles"));
        assert!(stdout.contains("Total songs in 'happy': 1"));

        let output = moodify_with_file(&path, &["pick", "HAPPY"]);
        assert_eq!(String::from_utf8_lossy(&output.stdout), "Here Comes the Sun by The Beatles\n");

        let output = moodify_with_file(&path, &["delete", "happy", "1", "--yes"]);
        assert!(output.status.success());
        let (library, _) = open(&path);
        assert!(library.catalog().is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_input_fails() -> Result<()> {
        let dir = TempDir::new()?;
        let path = catalog_path(&dir);

        let output = moodify_with_file(&path, &["add", "happy", "  ", "Somebody"]);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Title cannot be empty."));

        let output = moodify_with_file(&path, &["list", "grumpy"]);
        assert!(!output.status.success());

        let output = moodify_with_file(&path, &["delete", "sad", "1", "--yes"]);
        assert!(!output.status.success());
        Ok(())
    }

    #[test]
    fn test_console_session_over_stdin() -> Result<()> {
        let dir = TempDir::new()?;
        let path = catalog_path(&dir);

        let mut child = Command::new(env!("CARGO_BIN_EXE_moodify"))
            .args(["--file", path.to_str().unwrap()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        child
            .stdin
            .take()
            .unwrap()
            .write_all(b"2\n4\nThunderstruck\nAC/DC\n1\n4\n5\n")?;
        let output = child.wait_with_output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());
        assert!(stdout.contains("Welcome to Moodify!"));
        assert!(stdout.contains("Here's a random energetic song:\n\nThunderstruck by AC/DC"));
        assert!(stdout.contains("Exiting..."));
        Ok(())
    }
}
