use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use promptdeck_core::{Category, Filter};
use crate::app::App;
use crate::tui::AppEvent;

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key).await?,
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => app.on_tick(),
        AppEvent::CopyExpired(expired) => app.on_copy_expired(expired),
    }
    Ok(())
}

async fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(());
    }

    // Help overlay swallows everything except its own close keys
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return Ok(());
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.move_first(),
        KeyCode::Char('G') | KeyCode::End => app.move_last(),

        // Filters
        KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => app.next_filter().await,
        KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => app.prev_filter().await,
        KeyCode::Char('0') => app.select_filter(Filter::All).await,
        KeyCode::Char('*') => app.select_filter(Filter::Favorites).await,
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(filter) = category_shortcut(c) {
                app.select_filter(filter).await;
            }
        }

        // Prompt actions
        KeyCode::Char('v') => app.toggle_view().await,
        KeyCode::Char('f') => app.toggle_selected_favorite().await,
        KeyCode::Char('c') | KeyCode::Char('y') | KeyCode::Enter => app.copy_selected().await,

        _ => {}
    }

    Ok(())
}

/// `1` is the first category, `2` the second, and so on.
fn category_shortcut(c: char) -> Option<Filter> {
    let index = c.to_digit(10)? as usize;
    Category::all()
        .get(index.checked_sub(1)?)
        .copied()
        .map(Filter::Category)
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let in_body = app
        .body_area
        .map(|r| {
            mouse.column >= r.x
                && mouse.column < r.x + r.width
                && mouse.row >= r.y
                && mouse.row < r.y + r.height
        })
        .unwrap_or(false);

    if !in_body {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => app.move_down(),
        MouseEventKind::ScrollUp => app.move_up(),
        _ => {}
    }
}
