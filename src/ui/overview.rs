//! Controller behind the song overview: a two-column table of the library,
//! a details panel that mirrors the selected row, and the new/edit/delete
//! commands.
//!
//! The controller never owns the song list. The shell hands it over once via
//! [`OverviewController::bind_list`], and everything that needs the shell's
//! window (modal dialogs, warnings) goes through the [`OverviewHost`] passed
//! to each command.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use anyhow::{anyhow, Result};
use tracing::{debug, info, warn};

use crate::models::Item;
use crate::store::{ItemList, SharedItem};

use super::table::{Column, SongTable};

/// How a modal edit dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Confirmed,
    Cancelled,
}

/// A non-fatal notice shown to the user. Showing one never changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advisory {
    pub title: &'static str,
    pub header: &'static str,
    pub body: &'static str,
}

/// Shown when delete or edit is requested with no row selected.
pub const NO_SELECTION: Advisory = Advisory {
    title: "No Selection",
    header: "No item Selected",
    body: "Please select an item in the table.",
};

/// What the shell has to provide for the overview commands.
pub trait OverviewHost {
    /// Handle used to make dialogs modal to the main window.
    type Window;

    fn primary_window(&self) -> Self::Window;

    /// Let the user edit `item` in a modal dialog.
    ///
    /// Implementations only write to `item` when returning
    /// [`EditOutcome::Confirmed`]; a cancelled dialog leaves it exactly as it
    /// was. The song list stays readable while the dialog is open. Borrow the
    /// record only to read it up front and to write the confirmed values.
    fn show_item_edit_dialog(&mut self, item: &SharedItem, owner: &Self::Window)
        -> Result<EditOutcome>;

    fn show_advisory(&mut self, advisory: &Advisory, owner: &Self::Window) -> Result<()>;
}

/// Result of a single overview command, for status reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Created { index: usize },
    Edited { index: usize },
    Deleted { index: usize, item: Item },
    Cancelled,
    NoSelection,
}

/// The two text labels of the details panel.
#[derive(Debug, Default)]
pub struct DetailLabels {
    name: RefCell<String>,
    time: RefCell<String>,
}

impl DetailLabels {
    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn time(&self) -> String {
        self.time.borrow().clone()
    }

    fn show(&self, item: Option<&Item>) {
        let (name, time) = item.map_or(("", ""), |item| (item.name.as_str(), item.time.as_str()));
        *self.name.borrow_mut() = name.to_string();
        *self.time.borrow_mut() = time.to_string();
    }
}

fn item_name(item: &Item) -> &str {
    &item.name
}

fn item_time(item: &Item) -> &str {
    &item.time
}

pub struct OverviewController {
    table: SongTable,
    labels: Rc<DetailLabels>,
    items: Weak<ItemList>,
}

impl Default for OverviewController {
    fn default() -> Self {
        Self::new()
    }
}

impl OverviewController {
    pub fn new() -> Self {
        let mut table = SongTable::new();
        table.configure_columns(vec![
            Column::new("Name", item_name),
            Column::new("Time", item_time),
        ]);

        let labels = Rc::new(DetailLabels::default());
        labels.show(None);

        let listener_labels = Rc::downgrade(&labels);
        table.on_selection_changed(move |item| {
            if let Some(labels) = listener_labels.upgrade() {
                labels.show(item);
            }
        });

        Self {
            table,
            labels,
            items: Weak::new(),
        }
    }

    /// Attach the shell's song list. The table stays in sync with it from
    /// here on.
    pub fn bind_list(&mut self, list: &Rc<ItemList>) {
        self.items = Rc::downgrade(list);
        self.table.set_items(list);
        self.show_details(None);
    }

    /// Mirror `item` into the detail labels, or blank them for `None`.
    pub fn show_details(&self, item: Option<&Item>) {
        self.labels.show(item);
    }

    pub fn labels(&self) -> &DetailLabels {
        &self.labels
    }

    pub fn table(&self) -> &SongTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut SongTable {
        &mut self.table
    }

    /// Remove the selected song from the list.
    pub fn on_delete<H: OverviewHost>(&mut self, host: &mut H) -> Result<CommandOutcome> {
        let (Some(index), Some(list)) = (self.table.selected_index(), self.items.upgrade()) else {
            return self.warn_no_selection(host);
        };
        match list.remove(index) {
            Some(item) => {
                info!(index, name = %item.name, "song deleted");
                Ok(CommandOutcome::Deleted { index, item })
            }
            None => self.warn_no_selection(host),
        }
    }

    /// Open the dialog on a blank song and append it if the user confirms.
    pub fn on_new<H: OverviewHost>(&mut self, host: &mut H) -> Result<CommandOutcome> {
        let list = self
            .items
            .upgrade()
            .ok_or_else(|| anyhow!("no song list bound to the overview"))?;

        let owner = host.primary_window();
        let draft: SharedItem = Rc::new(RefCell::new(Item::default()));
        match host.show_item_edit_dialog(&draft, &owner)? {
            EditOutcome::Confirmed => {
                {
                    let item = draft.borrow();
                    info!(name = %item.name, time = %item.time, "song added");
                }
                let index = list.push_shared(draft);
                Ok(CommandOutcome::Created { index })
            }
            EditOutcome::Cancelled => {
                debug!("new song discarded");
                Ok(CommandOutcome::Cancelled)
            }
        }
    }

    /// Edit the selected song in place. The details panel is refreshed by hand
    /// on confirm: the selection itself did not change, so the table's
    /// selection signal stays quiet.
    pub fn on_edit<H: OverviewHost>(&mut self, host: &mut H) -> Result<CommandOutcome> {
        let (Some(index), Some(list)) = (self.table.selected_index(), self.items.upgrade()) else {
            return self.warn_no_selection(host);
        };

        let owner = host.primary_window();
        let outcome = list
            .edit(index, |item| host.show_item_edit_dialog(item, &owner))
            .transpose()?;

        match outcome {
            Some(EditOutcome::Confirmed) => {
                let edited = list.get(index);
                if let Some(item) = &edited {
                    info!(index, name = %item.name, time = %item.time, "song updated");
                }
                self.show_details(edited.as_ref());
                Ok(CommandOutcome::Edited { index })
            }
            Some(EditOutcome::Cancelled) => {
                debug!(index, "song edit cancelled");
                Ok(CommandOutcome::Cancelled)
            }
            None => self.warn_no_selection(host),
        }
    }

    fn warn_no_selection<H: OverviewHost>(&self, host: &mut H) -> Result<CommandOutcome> {
        warn!("{}: {}", NO_SELECTION.header, NO_SELECTION.body);
        let owner = host.primary_window();
        host.show_advisory(&NO_SELECTION, &owner)?;
        Ok(CommandOutcome::NoSelection)
    }
}
