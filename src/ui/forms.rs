use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Item;

/// Draft of a song while the edit dialog is open. The record itself is only
/// touched by [`ItemForm::apply_to`], so abandoning the form is the rollback.
#[derive(Default, Clone)]
pub(crate) struct ItemForm {
    pub(crate) name: String,
    pub(crate) time: String,
    pub(crate) active: ItemField,
    pub(crate) error: Option<String>,
}

/// Fields available within the song form.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub(crate) enum ItemField {
    #[default]
    Name,
    Time,
}

impl ItemForm {
    /// Seed the form from the record being edited.
    pub(crate) fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            time: item.time.clone(),
            active: ItemField::Name,
            error: None,
        }
    }

    /// Swap focus between the name and time fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            ItemField::Name => ItemField::Time,
            ItemField::Time => ItemField::Name,
        };
    }

    /// Append a character to the active field. Control characters are
    /// rejected.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            ItemField::Name => self.name.push(ch),
            ItemField::Time => self.time.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            ItemField::Name => {
                self.name.pop();
            }
            ItemField::Time => {
                self.time.pop();
            }
        }
    }

    /// Trimmed `(name, time)` pair. Only the name is required; the time text
    /// is kept verbatim otherwise.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Name is required."));
        }
        Ok((name.to_string(), self.time.trim().to_string()))
    }

    /// Write the draft into `item`. On error the record is left untouched.
    pub(crate) fn apply_to(&self, item: &mut Item) -> Result<()> {
        let (name, time) = self.parse_inputs()?;
        item.name = name;
        item.time = time;
        Ok(())
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: ItemField) -> Line<'static> {
        let (value, placeholder) = match field {
            ItemField::Name => (&self.name, "<required>"),
            ItemField::Time => (&self.time, "<m:ss>"),
        };
        let is_active = self.active == field;

        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Character count of the requested field, used to place the cursor.
    pub(crate) fn value_len(&self, field: ItemField) -> usize {
        match field {
            ItemField::Name => self.name.chars().count(),
            ItemField::Time => self.time.chars().count(),
        }
    }
}
