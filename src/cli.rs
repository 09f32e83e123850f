//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `moodify` binary. With no subcommand the
//! interactive console starts.
//!
//! ## Commands
//!
//! - `console`: Interactive numbered-menu session (default)
//! - `tui`: Full-screen dialog interface
//! - `add`, `list`, `pick`, `delete`: One-shot catalog operations
//! - `moods`: Show the mood registry with song counts
//! - `completion`: Generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! moodify
//! moodify add happy "Here Comes the Sun" "The Beatles"
//! moodify --file ~/music/moods.json list HAPPY
//! moodify delete energetic 1 --yes
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::mood::Mood;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "moodify")]
#[command(about = "Moodify: keep a personal catalog of songs organized by mood")]
#[command(version)]
pub struct Args {
    /// Catalog file to use instead of ~/song_list.json
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// The subcommand to execute (defaults to `console`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Interactive console session
    ///
    /// Numbered menus on stdin/stdout: play a random song, add, list or
    /// delete songs. This is what runs when no subcommand is given.
    Console,

    /// Full-screen interface with dialogs
    ///
    /// Same operations as the console, presented as buttons and modal
    /// dialogs. Navigate with the arrow keys, Enter and Esc.
    Tui,

    /// Add a song to a mood
    Add {
        /// Mood to add the song to
        #[arg(value_enum, ignore_case = true)]
        mood: Mood,

        /// Song title
        title: String,

        /// Song artist
        artist: String,
    },

    /// List the songs of a mood
    List {
        #[arg(value_enum, ignore_case = true)]
        mood: Mood,
    },

    /// Print one random song from a mood
    Pick {
        #[arg(value_enum, ignore_case = true)]
        mood: Mood,
    },

    /// Delete a song by its position in `list` output
    Delete {
        #[arg(value_enum, ignore_case = true)]
        mood: Mood,

        /// 1-based position of the song
        position: usize,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show every mood with its menu key and song count
    Moods,

    /// Generate shell completions
    ///
    /// Usage: moodify completion bash > ~/.local/share/bash-completion/completions/moodify
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
