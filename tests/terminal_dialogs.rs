use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use crossterm::event::KeyCode;
use music_overview::ui::{drive, EditOutcome, KeySource, OverviewHost, TerminalHost, NO_SELECTION};
use music_overview::{App, Item};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

/// Replays a fixed list of key presses.
struct ScriptedKeys {
    keys: VecDeque<KeyCode>,
}

impl ScriptedKeys {
    fn new(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> Result<Option<KeyCode>> {
        self.keys
            .pop_front()
            .map(Some)
            .ok_or_else(|| anyhow!("key script exhausted"))
    }
}

fn typed(text: &str) -> Vec<KeyCode> {
    text.chars().map(KeyCode::Char).collect()
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(80, 24)).unwrap()
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn run(app: &mut App, keys: Vec<KeyCode>) -> Terminal<TestBackend> {
    let mut terminal = terminal();
    let mut keys = ScriptedKeys::new(keys);
    drive(app, &mut terminal, &mut keys).unwrap();
    terminal
}

#[test]
fn new_song_flow_appends_and_selects() {
    let mut app = App::new(Vec::new());
    let mut keys = vec![KeyCode::Char('+')];
    keys.extend(typed("Song A"));
    keys.push(KeyCode::Tab);
    keys.extend(typed("3:21"));
    keys.extend([KeyCode::Enter, KeyCode::Char('q')]);

    let terminal = run(&mut app, keys);

    assert_eq!(app.items().snapshot(), vec![Item::new("Song A", "3:21")]);
    assert_eq!(app.overview().labels().name(), "Song A");
    assert_eq!(app.status_text(), Some("Song added."));
    assert!(screen_text(&terminal).contains("Song A"));
}

#[test]
fn escape_abandons_edit_without_touching_the_record() {
    let mut app = App::new(vec![Item::new("Song A", "3:21")]);
    let mut keys = vec![KeyCode::Down, KeyCode::Char('e')];
    keys.extend([KeyCode::Backspace, KeyCode::Backspace]);
    keys.extend(typed("Z"));
    keys.extend([KeyCode::Esc, KeyCode::Char('q')]);

    run(&mut app, keys);

    assert_eq!(app.items().snapshot(), vec![Item::new("Song A", "3:21")]);
    assert_eq!(app.overview().labels().name(), "Song A");
    assert_eq!(app.status_text(), Some("Edit cancelled."));
}

#[test]
fn confirmed_edit_refreshes_details() {
    let mut app = App::new(vec![Item::new("Song A", "3:21")]);
    let mut keys = vec![KeyCode::Down, KeyCode::Char('e'), KeyCode::Tab];
    keys.extend([KeyCode::Backspace; 4]);
    keys.extend(typed("3:30"));
    keys.extend([KeyCode::Enter, KeyCode::Char('q')]);

    run(&mut app, keys);

    assert_eq!(app.items().snapshot(), vec![Item::new("Song A", "3:30")]);
    assert_eq!(app.overview().labels().time(), "3:30");
    assert_eq!(app.status_text(), Some("Song updated."));
}

#[test]
fn delete_without_selection_shows_warning_then_returns() {
    let mut app = App::new(vec![Item::new("Song A", "3:21")]);
    let keys = vec![KeyCode::Char('-'), KeyCode::Enter, KeyCode::Char('q')];

    run(&mut app, keys);

    assert_eq!(app.items().len(), 1);
    assert_eq!(app.status_text(), Some("No song selected."));
}

#[test]
fn delete_selected_moves_details_to_next_song() {
    let mut app = App::new(vec![Item::new("Song A", "3:21"), Item::new("Song B", "4:00")]);
    let keys = vec![KeyCode::Down, KeyCode::Delete, KeyCode::Char('q')];

    run(&mut app, keys);

    assert_eq!(app.items().snapshot(), vec![Item::new("Song B", "4:00")]);
    assert_eq!(app.overview().labels().name(), "Song B");
    assert_eq!(app.status_text(), Some("Song deleted."));
}

#[test]
fn escape_abandons_new_song() {
    let mut app = App::new(vec![Item::new("Song A", "3:21")]);
    let mut keys = vec![KeyCode::Char('+')];
    keys.extend(typed("Half typed"));
    keys.extend([KeyCode::Esc, KeyCode::Char('q')]);

    run(&mut app, keys);

    assert_eq!(app.items().snapshot(), vec![Item::new("Song A", "3:21")]);
    assert_eq!(app.status_text(), Some("Song creation cancelled."));
}

#[test]
fn long_name_keeps_the_dialog_drawable() {
    let mut app = App::new(Vec::new());
    let mut keys = vec![KeyCode::Char('+')];
    keys.extend(typed(&"x".repeat(300)));
    keys.extend([KeyCode::Enter, KeyCode::Char('q')]);

    run(&mut app, keys);

    assert_eq!(app.items().len(), 1);
    assert_eq!(app.items().get(0).map(|item| item.name.len()), Some(300));
    assert_eq!(app.status_text(), Some("Song added."));
}

#[test]
fn dialog_keeps_blank_name_open_with_error() {
    let mut terminal = terminal();
    let backdrop = Buffer::empty(terminal.get_frame().area());
    let mut keys = ScriptedKeys::new([KeyCode::Enter, KeyCode::Esc]);
    let item = Rc::new(RefCell::new(Item::default()));

    let outcome = {
        let mut host = TerminalHost::new(&mut terminal, &mut keys, backdrop);
        let owner = host.primary_window();
        host.show_item_edit_dialog(&item, &owner).unwrap()
    };

    assert_eq!(outcome, EditOutcome::Cancelled);
    assert!(item.borrow().is_blank());
    let screen = screen_text(&terminal);
    assert!(screen.contains("New Song"));
    assert!(screen.contains("Name is required."));
}

#[test]
fn advisory_waits_for_dismissal() {
    let mut terminal = terminal();
    let backdrop = Buffer::empty(terminal.get_frame().area());
    let mut keys = ScriptedKeys::new([KeyCode::Char('x'), KeyCode::Enter]);

    {
        let mut host = TerminalHost::new(&mut terminal, &mut keys, backdrop);
        let owner = host.primary_window();
        host.show_advisory(&NO_SELECTION, &owner).unwrap();
    }

    assert!(keys.keys.is_empty());
    let screen = screen_text(&terminal);
    assert!(screen.contains("No Selection"));
    assert!(screen.contains("No item Selected"));
    assert!(screen.contains("Please select an item in the table."));
}
