//! Core library surface for the Music Overview TUI application.
//!
//! The binary only wires configuration and logging to [`run_app`]; everything
//! else lives here so the controller and dialogs can be driven from tests.
pub mod config;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;

pub use config::AppConfig;

/// The domain record and the observable list the shell owns.
pub use models::{demo_library, Item};
pub use store::{ItemList, ListChange, ListObserver, SharedItem};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
