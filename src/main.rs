//! Binary entry point: read the configuration, start file logging, and drive
//! the Ratatui event loop until the user exits.
use anyhow::Context;
use music_overview::{demo_library, logging, run_app, App, AppConfig};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    // Logging is best effort; the UI works without it.
    if let Err(err) = logging::init(&config) {
        eprintln!("File logging disabled: {err}");
    }

    let items = if config.seed_demo_library {
        demo_library()
    } else {
        Vec::new()
    };

    let mut app = App::new(items);
    let result = run_app(&mut app, config.tick_rate());
    if let Err(err) = &result {
        tracing::error!("exiting after error: {err:#}");
    }
    result
}
