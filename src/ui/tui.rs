//! Full-screen dialog front end.
//!
//! The main window is a column of buttons; each operation opens a modal
//! dialog on top of it (radio-button mood picker, text entry, song list,
//! yes/no confirmation, message box). A dialog runs its own key loop and
//! returns when answered or closed, so the session drives this front end
//! exactly like the console one.

use anyhow::{Context, Result};
use log::debug;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::crossterm::cursor::Show;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::path::Path;

use super::{field_prompt, Interaction, Level, MenuAction, MoodPurpose, Notice};
use crate::catalog::Song;
use crate::error::Field;
use crate::library::{LoadOutcome, Library};
use crate::mood::Mood;
use crate::session;

const DIALOG_WIDTH: u16 = 56;

/// Where key presses come from.
///
/// `Ok(None)` means no more input will arrive; dialogs treat it as closed.
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Blocking key presses from the real terminal.
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
    }
}

/// Pre-recorded key presses.
impl KeySource for VecDeque<KeyEvent> {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.pop_front())
    }
}

/// Raw mode plus alternate screen for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable terminal raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

/// Run an interactive session in the full-screen interface.
pub fn run(library: &mut Library, outcome: &LoadOutcome) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("Failed to initialize terminal")?;
    let mut tui: Tui<CrosstermBackend<Stdout>, TerminalKeys> = Tui::new(terminal, TerminalKeys);
    session::run(library, outcome, &mut tui)
}

enum Dialog<'a> {
    MoodPicker {
        title: &'a str,
        cursor: usize,
        chosen: Option<Mood>,
        warning: bool,
    },
    TextInput {
        title: &'a str,
        prompt: &'a str,
        value: &'a str,
    },
    SongList {
        title: &'a str,
        heading: &'a str,
        songs: &'a [Song],
        cursor: usize,
    },
    Confirm {
        question: &'a str,
        yes: bool,
    },
    Message {
        notice: &'a Notice,
        scroll: u16,
    },
}

pub struct Tui<B: Backend, K: KeySource> {
    terminal: Terminal<B>,
    keys: K,
    menu_cursor: usize,
}

impl<B: Backend, K: KeySource> Tui<B, K> {
    pub fn new(terminal: Terminal<B>, keys: K) -> Self {
        Self {
            terminal,
            keys,
            menu_cursor: 0,
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    fn draw(&mut self, dialog: Option<&Dialog<'_>>) -> io::Result<()> {
        let cursor = self.menu_cursor;
        self.terminal.draw(|frame| {
            render_main(frame, cursor);
            if let Some(dialog) = dialog {
                render_dialog(frame, dialog);
            }
        })?;
        Ok(())
    }

    /// Next key press; Ctrl-C counts as closing the input.
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        let key = self.keys.next_key()?;
        Ok(key.filter(|k| !(k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c'))))
    }

    fn message(&mut self, notice: &Notice) -> Result<()> {
        let mut scroll: u16 = 0;
        loop {
            self.draw(Some(&Dialog::Message { notice, scroll }))?;
            match self.next_key()?.map(|k| k.code) {
                None | Some(KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ' | 'q')) => return Ok(()),
                Some(KeyCode::Up | KeyCode::Char('k')) => scroll = scroll.saturating_sub(1),
                Some(KeyCode::Down | KeyCode::Char('j')) => scroll = scroll.saturating_add(1),
                Some(_) => {}
            }
        }
    }
}

fn step(cursor: usize, len: usize, forward: bool) -> usize {
    if forward {
        (cursor + 1) % len
    } else {
        (cursor + len - 1) % len
    }
}

fn digit(code: KeyCode) -> Option<usize> {
    match code {
        KeyCode::Char(c) => c.to_digit(10).map(|d| d as usize),
        _ => None,
    }
}

impl<B: Backend, K: KeySource> Interaction for Tui<B, K> {
    fn loaded(&mut self, path: &Path, outcome: &LoadOutcome) -> Result<()> {
        let LoadOutcome::Recovered { error, backup } = outcome else {
            return Ok(());
        };
        let mut body = format!("Error loading {}: {error}\n\nStarting with an empty catalog.", path.display());
        if let Some(backup) = backup {
            body.push_str(&format!(" The unreadable file was kept as {}.", backup.display()));
        }
        self.message(&Notice::error("Load Error", body))
    }

    fn main_menu(&mut self) -> Result<MenuAction> {
        let len = MenuAction::ALL.len();
        loop {
            self.draw(None)?;
            let Some(key) = self.next_key()? else {
                return Ok(MenuAction::Exit);
            };
            match key.code {
                KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                    self.menu_cursor = step(self.menu_cursor, len, false);
                }
                KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                    self.menu_cursor = step(self.menu_cursor, len, true);
                }
                KeyCode::Enter => return Ok(MenuAction::ALL[self.menu_cursor]),
                KeyCode::Esc | KeyCode::Char('q') => return Ok(MenuAction::Exit),
                code => {
                    if let Some(action) = digit(code).and_then(MenuAction::from_key) {
                        self.menu_cursor = action.key() - 1;
                        return Ok(action);
                    }
                }
            }
        }
    }

    fn choose_mood(&mut self, purpose: MoodPurpose) -> Result<Option<Mood>> {
        let mut cursor = 0;
        let mut chosen = None;
        let mut warning = false;
        loop {
            self.draw(Some(&Dialog::MoodPicker {
                title: purpose.heading(),
                cursor,
                chosen,
                warning,
            }))?;
            let Some(key) = self.next_key()? else {
                return Ok(None);
            };
            match key.code {
                KeyCode::Esc => return Ok(None),
                KeyCode::Up | KeyCode::Char('k') => cursor = step(cursor, Mood::COUNT, false),
                KeyCode::Down | KeyCode::Char('j') => cursor = step(cursor, Mood::COUNT, true),
                KeyCode::Char(' ') => chosen = Some(Mood::ALL[cursor]),
                KeyCode::Enter => match chosen {
                    Some(mood) => return Ok(Some(mood)),
                    None => warning = true,
                },
                code => {
                    if let Some(mood) = digit(code).and_then(Mood::from_key) {
                        cursor = mood.key() - 1;
                        chosen = Some(mood);
                    }
                }
            }
            if chosen.is_some() {
                warning = false;
            }
        }
    }

    fn ask_text(&mut self, field: Field) -> Result<Option<String>> {
        let title = match field {
            Field::Title => "Song Title",
            Field::Artist => "Artist",
        };
        let mut value = String::new();
        loop {
            self.draw(Some(&Dialog::TextInput {
                title,
                prompt: field_prompt(field),
                value: &value,
            }))?;
            let Some(key) = self.next_key()? else {
                return Ok(None);
            };
            match key.code {
                KeyCode::Enter => return Ok(Some(value)),
                KeyCode::Esc => return Ok(None),
                KeyCode::Backspace => {
                    value.pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => value.push(c),
                _ => {}
            }
        }
    }

    fn show_songs(&mut self, mood: Mood, songs: &[Song]) -> Result<()> {
        let mut body: String = songs
            .iter()
            .enumerate()
            .map(|(i, song)| format!("{}. {song}\n", i + 1))
            .collect();
        body.push_str(&format!("\nTotal songs: {}", songs.len()));
        let title = format!("Songs in {} Mood", mood.display_name());
        self.message(&Notice::info(title, body))
    }

    fn choose_position(&mut self, mood: Mood, songs: &[Song]) -> Result<Option<usize>> {
        if songs.is_empty() {
            return Ok(None);
        }
        let title = format!("Delete Song from {}", mood.display_name());
        let heading = format!("Songs in '{mood}' mood:");
        let mut cursor = 0;
        loop {
            self.draw(Some(&Dialog::SongList {
                title: &title,
                heading: &heading,
                songs,
                cursor,
            }))?;
            let Some(key) = self.next_key()? else {
                return Ok(None);
            };
            match key.code {
                KeyCode::Enter | KeyCode::Delete => return Ok(Some(cursor + 1)),
                KeyCode::Esc | KeyCode::Char('c') => return Ok(None),
                KeyCode::Up | KeyCode::Char('k') => cursor = step(cursor, songs.len(), false),
                KeyCode::Down | KeyCode::Char('j') => cursor = step(cursor, songs.len(), true),
                KeyCode::Home => cursor = 0,
                KeyCode::End => cursor = songs.len() - 1,
                _ => {}
            }
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let mut yes = false;
        loop {
            self.draw(Some(&Dialog::Confirm { question, yes }))?;
            let Some(key) = self.next_key()? else {
                return Ok(false);
            };
            match key.code {
                KeyCode::Char('y' | 'Y') => return Ok(true),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => return Ok(false),
                KeyCode::Enter => return Ok(yes),
                KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => yes = !yes,
                _ => {}
            }
        }
    }

    fn notify(&mut self, notice: Notice) -> Result<()> {
        debug!("{}: {}", notice.title, notice.body);
        self.message(&notice)
    }
}

fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn selected() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

fn hint(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
}

fn render_main(frame: &mut Frame, cursor: usize) {
    let area = frame.area();
    let block = Block::default().borders(Borders::ALL).title(" Moodify ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [heading, buttons, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new("Welcome to Moodify!")
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM)),
        heading,
    );

    let items: Vec<ListItem> = MenuAction::ALL
        .iter()
        .map(|action| ListItem::new(Line::from(format!("[ {} ]", action.label())).alignment(Alignment::Center)))
        .collect();
    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(List::new(items).highlight_style(selected()), buttons, &mut state);

    frame.render_widget(hint("↑/↓ move · Enter select · 1-5 shortcut · q quit"), footer);
}

fn dialog_block(title: &str, level: Level) -> Block<'_> {
    let color = match level {
        Level::Info => Color::Cyan,
        Level::Warning => Color::Yellow,
        Level::Error => Color::Red,
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {title} "))
}

/// Clear `height` rows in the middle of the screen, draw the frame, and
/// return the body and footer areas.
fn open_dialog(frame: &mut Frame, block: Block<'_>, height: u16) -> (Rect, Rect) {
    let area = centered(DIALOG_WIDTH, height, frame.area());
    frame.render_widget(Clear, area);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let [body, footer] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    (body, footer)
}

fn render_dialog(frame: &mut Frame, dialog: &Dialog<'_>) {
    let max_height = frame.area().height;
    match dialog {
        Dialog::MoodPicker {
            title,
            cursor,
            chosen,
            warning,
        } => {
            let (body, footer) = open_dialog(frame, dialog_block(title, Level::Info), Mood::COUNT as u16 + 5);
            let mut lines: Vec<Line> = Mood::ALL
                .iter()
                .enumerate()
                .map(|(i, mood)| {
                    let mark = if *chosen == Some(*mood) { "(•)" } else { "( )" };
                    let text = format!(" {mark} {}", mood.display_name());
                    if i == *cursor {
                        Line::styled(text, selected())
                    } else {
                        Line::from(text)
                    }
                })
                .collect();
            lines.push(Line::from(""));
            if *warning {
                lines.push(Line::styled("Please select a mood.", Style::default().fg(Color::Yellow)));
            }
            frame.render_widget(Paragraph::new(Text::from(lines)), body);
            frame.render_widget(hint("Space/1-6 select · Enter OK · Esc cancel"), footer);
        }
        Dialog::TextInput { title, prompt, value } => {
            let (body, footer) = open_dialog(frame, dialog_block(title, Level::Info), 6);
            let input = format!("> {value}");
            let text = Text::from(vec![Line::from(*prompt), Line::from(""), Line::from(input.clone())]);
            frame.render_widget(Paragraph::new(text), body);
            frame.render_widget(hint("Enter OK · Esc cancel"), footer);

            let x = body.x + (input.chars().count() as u16).min(body.width.saturating_sub(1));
            frame.set_cursor_position((x, body.y + 2));
        }
        Dialog::SongList {
            title,
            heading,
            songs,
            cursor,
        } => {
            let height = (songs.len() as u16).saturating_add(5).min(max_height);
            let (body, footer) = open_dialog(frame, dialog_block(title, Level::Info), height);
            let [head, list] = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(body);
            frame.render_widget(Paragraph::new(*heading), head);

            let items: Vec<ListItem> = songs.iter().map(|song| ListItem::new(song.to_string())).collect();
            let mut state = ListState::default().with_selected(Some(*cursor));
            frame.render_stateful_widget(
                List::new(items).highlight_style(selected()).highlight_symbol("> "),
                list,
                &mut state,
            );
            frame.render_widget(hint("Enter delete selected · Esc close"), footer);
        }
        Dialog::Confirm { question, yes } => {
            let (body, footer) = open_dialog(frame, dialog_block("Confirm Delete", Level::Warning), 7);
            let [text, buttons] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(body);
            frame.render_widget(Paragraph::new(*question).wrap(Wrap { trim: true }), text);

            let (yes_style, no_style) = if *yes {
                (selected(), Style::default())
            } else {
                (Style::default(), selected())
            };
            let line = Line::from(vec![
                Span::styled("[ Yes ]", yes_style),
                Span::raw("   "),
                Span::styled("[ No ]", no_style),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(Paragraph::new(line), buttons);
            frame.render_widget(hint("y/n · ←/→ choose · Enter confirm"), footer);
        }
        Dialog::Message { notice, scroll } => {
            let height = (notice.body.lines().count() as u16).saturating_add(5).min(max_height);
            let (body, footer) = open_dialog(frame, dialog_block(&notice.title, notice.level), height);
            frame.render_widget(
                Paragraph::new(notice.body.as_str())
                    .wrap(Wrap { trim: false })
                    .scroll((*scroll, 0)),
                body,
            );
            frame.render_widget(hint("Enter close · ↑/↓ scroll"), footer);
        }
    }
}
