use std::rc::Rc;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::models::Item;
use crate::store::ItemList;

use super::overview::{CommandOutcome, OverviewController, OverviewHost};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown.
const PAGE_SIZE: isize = 5;

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// The application shell: owns the song list and routes keys to the overview.
pub struct App {
    items: Rc<ItemList>,
    overview: OverviewController,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(items: Vec<Item>) -> Self {
        let items = ItemList::new(items);
        let mut overview = OverviewController::new();
        overview.bind_list(&items);
        Self {
            items,
            overview,
            status: None,
        }
    }

    pub fn items(&self) -> &Rc<ItemList> {
        &self.items
    }

    pub fn overview(&self) -> &OverviewController {
        &self.overview
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Handle one key press. Returns `true` when the app should exit.
    pub fn handle_key<H: OverviewHost>(&mut self, code: KeyCode, host: &mut H) -> Result<bool> {
        let table = self.overview.table_mut();
        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc => {
                table.clear_selection();
                self.clear_status();
            }
            KeyCode::Up => table.move_selection(-1),
            KeyCode::Down => table.move_selection(1),
            KeyCode::PageUp => table.move_selection(-PAGE_SIZE),
            KeyCode::PageDown => table.move_selection(PAGE_SIZE),
            KeyCode::Home => table.select_first(),
            KeyCode::End => table.select_last(),
            KeyCode::Char('+') | KeyCode::Char('n') | KeyCode::Char('N') => {
                match self.overview.on_new(host)? {
                    CommandOutcome::Created { index } => {
                        self.overview.table_mut().select(Some(index));
                        self.set_status("Song added.", StatusKind::Info);
                    }
                    outcome => self.report(outcome, "Song creation cancelled."),
                }
            }
            KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
                let outcome = self.overview.on_edit(host)?;
                self.report(outcome, "Edit cancelled.");
            }
            KeyCode::Char('-') | KeyCode::Delete => {
                let outcome = self.overview.on_delete(host)?;
                self.report(outcome, "Deletion cancelled.");
            }
            _ => {}
        }
        Ok(false)
    }

    /// Put the outcome of a command on the status line. `cancelled` is the
    /// command's own wording for a dismissed dialog.
    fn report(&mut self, outcome: CommandOutcome, cancelled: &'static str) {
        match outcome {
            CommandOutcome::Created { .. } => self.set_status("Song added.", StatusKind::Info),
            CommandOutcome::Edited { .. } => self.set_status("Song updated.", StatusKind::Info),
            CommandOutcome::Deleted { .. } => self.set_status("Song deleted.", StatusKind::Info),
            CommandOutcome::Cancelled => self.set_status(cancelled, StatusKind::Info),
            CommandOutcome::NoSelection => {
                self.set_status("No song selected.", StatusKind::Error)
            }
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(content_area);
        self.draw_song_table(frame, columns[0]);
        self.draw_details(frame, columns[1]);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }
    }

    fn draw_song_table(&self, frame: &mut Frame, area: Rect) {
        let table = self.overview.table();
        let block = Block::default().title("Songs").borders(Borders::ALL);

        let rows = table.rows();
        if rows.is_empty() {
            let message = Paragraph::new("No songs yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(table.columns().iter().map(|column| column.title()))
            .style(Style::default().add_modifier(Modifier::BOLD));
        let widget = Table::new(
            rows.into_iter().map(Row::new),
            [Constraint::Percentage(75), Constraint::Percentage(25)],
        )
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(table.selected_index());
        frame.render_stateful_widget(widget, area, &mut state);
    }

    fn draw_details(&self, frame: &mut Frame, area: Rect) {
        let labels = self.overview.labels();
        let field_style = Style::default().add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(vec![
                Span::styled("Name: ", field_style),
                Span::raw(labels.name()),
            ]),
            Line::from(vec![
                Span::styled("Time: ", field_style),
                Span::raw(labels.time()),
            ]),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Details").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

fn footer_instructions() -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled("[↑↓]", key_style),
        Span::raw(" Select   "),
        Span::styled("[+]", key_style),
        Span::raw(" New   "),
        Span::styled("[e]", key_style),
        Span::raw(" Edit   "),
        Span::styled("[-]", key_style),
        Span::raw(" Delete   "),
        Span::styled("[Esc]", key_style),
        Span::raw(" Clear   "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit"),
    ])
}
