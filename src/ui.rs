//! Ratatui front-end: the song overview table, its details panel and the
//! modal dialogs behind the new/edit/delete commands.

mod app;
mod dialogs;
mod forms;
mod helpers;
mod overview;
mod table;
mod terminal;

pub use app::App;
pub use dialogs::{OwnerWindow, TerminalHost};
pub use overview::{
    Advisory, CommandOutcome, DetailLabels, EditOutcome, OverviewController, OverviewHost,
    NO_SELECTION,
};
pub use table::{Column, SongTable};
pub use terminal::{drive, run_app, CrosstermKeys, KeySource};
