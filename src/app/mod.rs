//! TUI Application module

mod async_ops;
mod events;
mod state;
mod ui;

pub use state::{AppState, Mode, View};

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::runtime::Runtime;

use crate::api::AnimeGateway;
use crate::api::jikan::JikanClient;
use crate::config::Config;
use crate::demo::DemoGateway;
use crate::favorites::FavoritesStore;
use crate::images;

use async_ops::{AsyncCommand, AsyncHandle, AsyncResult, spawn_worker};

/// Artificial latency of the offline gateway, so loaders stay visible
const DEMO_LATENCY: Duration = Duration::from_millis(400);

/// Run the TUI against the Jikan API
pub fn run() -> Result<()> {
    let config = Config::load()?;
    let gateway = JikanClient::new(&config.api_base_url, config.request_timeout());
    run_with_gateway(config, gateway)
}

/// Run the TUI against the bundled offline snapshot
pub fn run_demo() -> Result<()> {
    let config = Config::load()?;
    let gateway = DemoGateway::new()
        .context("Failed to load demo snapshot")?
        .with_latency(DEMO_LATENCY);
    run_with_gateway(config, gateway)
}

fn run_with_gateway<G>(config: Config, gateway: G) -> Result<()>
where
    G: AnimeGateway + 'static,
{
    // Create tokio runtime
    let rt = Runtime::new()?;

    let favorites = FavoritesStore::open()?;
    let mut state = AppState::new(config, favorites)?;

    // Spawn async worker
    let async_handle = rt.block_on(async { spawn_worker(Arc::new(gateway)) });

    // Query graphics support before the terminal enters raw mode
    if state.config.show_images {
        images::init_picker();
        tracing::info!(native = images::has_native_graphics(), "Image protocol ready");
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let initial = state.start();
    let _ = async_handle
        .cmd_tx
        .blocking_send(AsyncCommand::Fetch(initial));

    // Main loop
    let result = run_app(&mut terminal, &mut state, async_handle);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    // Save config on exit
    state.config.save()?;

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    mut async_handle: AsyncHandle,
) -> Result<()> {
    loop {
        // Process any async results
        while let Ok(result) = async_handle.result_rx.try_recv() {
            handle_async_result(state, result);
        }

        // Draw UI
        terminal.draw(|frame| ui::render(frame, state))?;

        // Handle events
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && let Some(cmd) = events::handle_key(state, key)
        {
            let _ = async_handle.cmd_tx.blocking_send(cmd);
        }

        // Queue the cover of the open detail
        if let Some(url) = state.cover_to_load() {
            state.mark_cover_loading(&url);
            let _ = async_handle
                .cmd_tx
                .blocking_send(AsyncCommand::LoadImage { url });
        }

        // Tick for animations
        state.tick();

        if state.should_quit {
            // Shutdown async worker
            let _ = async_handle.cmd_tx.blocking_send(AsyncCommand::Shutdown);
            break;
        }
    }

    Ok(())
}

fn handle_async_result(state: &mut AppState, result: AsyncResult) {
    match result {
        AsyncResult::Fetched(outcome) => state.apply_outcome(outcome),
        AsyncResult::ImageLoaded { url, image } => state.cover_loaded(url, image),
        // Images fail quietly; the detail view renders without a cover
        AsyncResult::ImageFailed { url, error } => state.cover_failed(&url, &error),
    }
}
