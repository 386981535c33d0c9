use std::sync::Arc;

use anyhow::{Context, Result};
use promptdeck_core::{Catalog, Clipboard, Config, Deck, FileStore};

mod app;
mod clipboard;
mod handler;
mod logging;
mod toast;
mod tui;
mod ui;

use app::App;
use clipboard::SystemClipboard;
use toast::ToastQueue;
use tui::{EventHandler, Tui};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Ignoring unreadable config: {}", e);
        Config::new()
    });

    if let Err(e) = logging::init(&config) {
        eprintln!("Logging disabled: {}", e);
    }

    let catalog = match &config.catalog_path {
        Some(path) => Arc::new(
            Catalog::load_from_json(path)
                .await
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        ),
        None => Catalog::builtin(),
    };

    let store = match &config.storage_path {
        Some(path) => FileStore::new(path),
        None => FileStore::open_default()?,
    };
    tracing::info!("Favorites stored in {}", store.path().display());

    let clipboard: Box<dyn Clipboard> = Box::new(SystemClipboard::new());
    let (deck, expiries) = Deck::new(catalog, store, clipboard, ToastQueue::new());
    let deck = deck.with_notifications(config.toast_placement(), config.toast_duration());
    let mut app = App::new(deck);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(expiries);

    let result = run(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    if let Err(e) = &result {
        tracing::error!("Exited with error: {:#}", e);
    }
    result
}

async fn run(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }
    Ok(())
}
