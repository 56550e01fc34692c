use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;

use super::app::App;
use super::dialogs::TerminalHost;

/// Where key presses come from. The main loop and every modal dialog pull
/// from the same source.
pub trait KeySource {
    /// Wait up to one tick for a key press. `None` means "redraw and ask
    /// again".
    fn next_key(&mut self) -> Result<Option<KeyCode>>;
}

/// Reads key presses from the real terminal.
pub struct CrosstermKeys {
    tick_rate: Duration,
}

impl CrosstermKeys {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }
}

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> Result<Option<KeyCode>> {
        if !event::poll(self.tick_rate).context("event polling failed")? {
            return Ok(None);
        }
        match event::read().context("failed to read event")? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                // Raw mode swallows SIGINT, so treat Ctrl+C as quit.
                if key_event.modifiers.contains(KeyModifiers::CONTROL)
                    && key_event.code == KeyCode::Char('c')
                {
                    return Ok(Some(KeyCode::Char('q')));
                }
                Ok(Some(key_event.code))
            }
            _ => Ok(None),
        }
    }
}

/// Spin up the terminal backend, enter the draw loop, and keep processing input
/// until the user quits.
pub fn run_app(app: &mut App, tick_rate: Duration) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;

    let mut keys = CrosstermKeys::new(tick_rate);
    let result = drive(app, &mut terminal, &mut keys);

    cleanup_terminal(&mut terminal)?;
    result
}

/// Draw the app and dispatch keys until it asks to exit.
///
/// Each command gets a [`TerminalHost`] holding the frame that was on screen
/// when the key arrived, which modal dialogs paint underneath themselves.
pub fn drive<B: Backend, K: KeySource>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    keys: &mut K,
) -> Result<()> {
    loop {
        let backdrop = terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?
            .buffer
            .clone();

        if let Some(code) = keys.next_key()? {
            let mut host = TerminalHost::new(terminal, keys, backdrop);
            if app.handle_key(code, &mut host)? {
                return Ok(());
            }
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal
        .show_cursor()
        .context("failed to restore cursor visibility")
}
