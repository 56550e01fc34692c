//! Terminal implementations of the modal dialogs used by the overview.
//!
//! A dialog runs its own draw/read loop on top of the main window until the
//! user closes it, so from the caller's side it is an ordinary blocking call.

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use crate::store::SharedItem;

use super::forms::{ItemField, ItemForm};
use super::helpers::{centered_rect, paint_backdrop, surface_error};
use super::overview::{Advisory, EditOutcome, OverviewHost};
use super::terminal::KeySource;

/// The main window as it looked when a dialog was opened. Dialogs are drawn
/// over it so the user keeps their bearings.
#[derive(Clone)]
pub struct OwnerWindow {
    backdrop: Buffer,
}

/// [`OverviewHost`] backed by a ratatui terminal.
pub struct TerminalHost<'a, B: Backend, K: KeySource> {
    terminal: &'a mut Terminal<B>,
    keys: &'a mut K,
    backdrop: Buffer,
}

impl<'a, B: Backend, K: KeySource> TerminalHost<'a, B, K> {
    pub fn new(terminal: &'a mut Terminal<B>, keys: &'a mut K, backdrop: Buffer) -> Self {
        Self {
            terminal,
            keys,
            backdrop,
        }
    }
}

impl<B: Backend, K: KeySource> OverviewHost for TerminalHost<'_, B, K> {
    type Window = OwnerWindow;

    fn primary_window(&self) -> OwnerWindow {
        OwnerWindow {
            backdrop: self.backdrop.clone(),
        }
    }

    fn show_item_edit_dialog(&mut self, item: &SharedItem, owner: &OwnerWindow) -> Result<EditOutcome> {
        let (title, mut form) = {
            let item = item.borrow();
            let title = if item.is_blank() { "New Song" } else { "Edit Song" };
            (title, ItemForm::from_item(&item))
        };

        loop {
            self.terminal
                .draw(|frame| {
                    let area = frame.area();
                    paint_backdrop(frame, &owner.backdrop);
                    draw_item_form(frame, area, title, &form);
                })
                .context("failed to draw song dialog")?;

            let Some(code) = self.keys.next_key()? else {
                continue;
            };
            match code {
                KeyCode::Esc => return Ok(EditOutcome::Cancelled),
                KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
                KeyCode::Backspace => form.backspace(),
                KeyCode::Enter => {
                    let applied = form.apply_to(&mut *item.borrow_mut());
                    match applied {
                        Ok(()) => return Ok(EditOutcome::Confirmed),
                        Err(err) => form.error = Some(surface_error(&err)),
                    }
                }
                KeyCode::Char(ch) => {
                    if form.push_char(ch) {
                        form.error = None;
                    }
                }
                _ => {}
            }
        }
    }

    fn show_advisory(&mut self, advisory: &Advisory, owner: &OwnerWindow) -> Result<()> {
        loop {
            self.terminal
                .draw(|frame| {
                    let area = frame.area();
                    paint_backdrop(frame, &owner.backdrop);
                    draw_advisory(frame, area, advisory);
                })
                .context("failed to draw warning")?;

            if let Some(KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) = self.keys.next_key()?
            {
                return Ok(());
            }
        }
    }
}

fn draw_item_form(frame: &mut Frame, area: Rect, title: &str, form: &ItemForm) {
    let popup_area = centered_rect(60, 40, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines = vec![
        form.build_line("Name", ItemField::Name),
        form.build_line("Time", ItemField::Time),
        Line::from(""),
    ];

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter to save • Tab to switch • Esc to cancel",
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);

    let (prefix, row) = match form.active {
        ItemField::Name => ("Name: ", 0),
        ItemField::Time => ("Time: ", 1),
    };
    let x = cursor_x(inner, prefix, form.value_len(form.active));
    frame.set_cursor_position((x, inner.y + row));
}

/// Column of the text cursor after `prefix` and `value_len` typed characters,
/// kept inside `inner` however long the value grows.
fn cursor_x(inner: Rect, prefix: &str, value_len: usize) -> u16 {
    let offset = u16::try_from(prefix.len().saturating_add(value_len)).unwrap_or(u16::MAX);
    inner
        .x
        .saturating_add(offset)
        .min(inner.right().saturating_sub(1))
        .max(inner.x)
}

fn draw_advisory(frame: &mut Frame, area: Rect, advisory: &Advisory) {
    let popup_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(advisory.title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let lines = vec![
        Line::from(Span::styled(
            advisory.header,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(advisory.body),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to continue.",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}
