use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::{debug, info};
use std::io;

use moodify::cli::{self, Command};
use moodify::config::Config;
use moodify::library::{Library, LoadOutcome};
use moodify::ui::console::Console;
use moodify::{commands, completion, session, ui};

/// Main entry point for Moodify.
///
/// Initializes logging, parses arguments, opens the catalog and dispatches
/// to the chosen front end or one-shot command.
///
/// # Logging
///
/// Controlled via `RUST_LOG`, e.g. `RUST_LOG=moodify=debug moodify list sad`.
/// Logs go to stderr.
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let command = args.command.unwrap_or(Command::Console);

    // Completion needs no catalog
    if let Command::Completion { shell } = command {
        let mut cmd = cli::Args::command();
        completion::generate_completions(
            completion::shell_to_completion_shell(shell),
            &mut cmd,
            &mut io::stdout(),
        );
        return Ok(());
    }

    let config = Config::resolve(args.file.as_deref())?;
    debug!("Catalog file: {}", config.catalog_path.display());
    let (mut library, outcome) = Library::open(&config);

    match command {
        Command::Console => {
            info!("Starting console session");
            session::run(&mut library, &outcome, &mut Console::stdio())?;
        }
        Command::Tui => {
            info!("Starting full-screen session");
            ui::tui::run(&mut library, &outcome)?;
        }
        one_shot => {
            if let LoadOutcome::Recovered { error, backup } = &outcome {
                eprintln!("Warning: {error}");
                if let Some(backup) = backup {
                    eprintln!("The unreadable file was kept as {}.", backup.display());
                }
            }
            let mut console = Console::stdio();
            match one_shot {
                Command::Add { mood, title, artist } => {
                    commands::add(&mut library, &mut console, mood, &title, &artist)?;
                }
                Command::List { mood } => commands::list(&library, &mut console, mood)?,
                Command::Pick { mood } => commands::pick(&library, &mut console, mood)?,
                Command::Delete { mood, position, yes } => {
                    commands::delete(&mut library, &mut console, mood, position, yes)?;
                }
                Command::Moods => commands::moods(&library, &mut console)?,
                Command::Console | Command::Tui | Command::Completion { .. } => {}
            }
        }
    }

    Ok(())
}
