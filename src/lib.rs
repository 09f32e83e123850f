//! Personal song catalog organized by mood.
//!
//! Songs (title and artist) are filed under one of six fixed moods and kept
//! in a single JSON file. Both front ends (a numbered console menu and a
//! full-screen dialog interface) drive the same session over the same
//! [`library::Library`], so validation and persistence rules are identical.
//!
//! ### Core Modules
//!
//! - [`mood`] - The fixed mood registry
//! - [`catalog`] - Songs per mood, validation, duplicate checks, random pick
//! - [`store`] - JSON persistence with atomic writes
//! - [`library`] - Catalog plus store; saves after every mutation
//! - [`session`] - Menu-driven flows shared by every front end
//!
//! ### Supporting Modules
//!
//! - [`ui`] - Console and full-screen front ends
//! - [`config`] - Catalog file location
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`commands`] - One-shot subcommands
//! - [`completion`] - Shell completion generation
//! - [`error`] - Error taxonomy
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use moodify::config::Config;
//! use moodify::library::Library;
//! use moodify::mood::Mood;
//!
//! let config = Config::new()?;
//! let (mut library, _outcome) = Library::open(&config);
//!
//! library.add(Mood::Happy, "Here Comes the Sun", "The Beatles")?;
//! if let Some(song) = library.pick_random(Mood::Happy) {
//!     println!("Now playing: {song}");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod completion;
pub mod config;
pub mod error;
pub mod library;
pub mod mood;
pub mod session;
pub mod store;
pub mod ui;
