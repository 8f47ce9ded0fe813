mod app;
mod handler;
mod logging;
mod tui;
mod ui;

use std::sync::Arc;

use agent_builder_core::{Config, TokioScheduler};
use anyhow::Result;

use app::App;
use tui::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config();

    // Logging has to be up before the terminal switches to the alternate screen
    if let Err(e) = logging::init(config.log_filter.as_deref()) {
        eprintln!("warning: file logging disabled: {e}");
    }

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(config.tick_rate());
    let mut app = App::new(&config, Arc::new(TokioScheduler), events.sender());

    tracing::info!("agent builder started");
    let result = run(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    tracing::info!(agent = %app.session.agent().id, "agent builder exited");
    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }
    }
    Ok(())
}

/// Read the config file, seeding it with defaults on first run
fn load_config() -> Config {
    let first_run = Config::get_config_path()
        .map(|path| !path.exists())
        .unwrap_or(false);

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("warning: using default settings: {e}");
        Config::default()
    });

    if first_run {
        if let Err(e) = config.save() {
            eprintln!("warning: could not write default config: {e}");
        }
    }
    config
}
