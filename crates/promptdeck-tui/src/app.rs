use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::widgets::TableState;
use promptdeck_core::{Clipboard, Deck, Expired, FileStore, Filter, Intent, ProjectedPrompt, ViewMode};

use crate::toast::ToastQueue;

pub type AppDeck = Deck<FileStore, Box<dyn Clipboard>, ToastQueue>;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub show_help: bool,
    pub deck: AppDeck,

    // Cursor into the current projection
    pub cursor: usize,
    pub table_state: TableState,
    // First card entry drawn in the cards view (updated during render)
    pub card_offset: usize,

    // Body area for mouse hit-testing (updated during render)
    pub body_area: Option<Rect>,
}

impl App {
    pub fn new(deck: AppDeck) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));

        Self {
            should_quit: false,
            show_help: false,
            deck,
            cursor: 0,
            table_state,
            card_offset: 0,
            body_area: None,
        }
    }

    pub fn prompts(&self) -> Vec<ProjectedPrompt> {
        self.deck.projected()
    }

    pub fn selected_prompt(&self) -> Option<ProjectedPrompt> {
        self.prompts().into_iter().nth(self.cursor)
    }

    pub fn active_filter(&self) -> Filter {
        self.deck.active_filter()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.deck.view_mode()
    }

    // Intents

    pub async fn dispatch(&mut self, intent: Intent) {
        let resets_cursor = matches!(intent, Intent::SelectFilter(_));
        self.deck.dispatch(intent).await;
        if resets_cursor {
            self.cursor = 0;
            self.card_offset = 0;
        }
        self.clamp_cursor();
    }

    pub async fn select_filter(&mut self, filter: Filter) {
        self.dispatch(Intent::SelectFilter(filter)).await;
    }

    pub async fn next_filter(&mut self) {
        self.select_filter(self.active_filter().next()).await;
    }

    pub async fn prev_filter(&mut self) {
        self.select_filter(self.active_filter().prev()).await;
    }

    pub async fn toggle_view(&mut self) {
        self.dispatch(Intent::ToggleViewMode).await;
    }

    pub async fn toggle_selected_favorite(&mut self) {
        if let Some(prompt) = self.selected_prompt() {
            self.dispatch(Intent::ToggleFavorite(prompt.id)).await;
        }
    }

    pub async fn copy_selected(&mut self) {
        if let Some(prompt) = self.selected_prompt() {
            self.dispatch(Intent::CopyPrompt(prompt.id)).await;
        }
    }

    pub fn on_copy_expired(&mut self, expired: Expired) {
        self.deck.expire(expired);
    }

    pub fn on_tick(&mut self) {
        let toasts = self.deck.notifier_mut();
        if !toasts.is_empty() {
            toasts.prune(Instant::now());
        }
    }

    // Cursor movement

    pub fn move_down(&mut self) {
        let len = self.prompts().len();
        if len > 0 {
            self.cursor = (self.cursor + 1).min(len - 1);
        }
        self.sync_table_selection();
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.sync_table_selection();
    }

    pub fn move_first(&mut self) {
        self.cursor = 0;
        self.sync_table_selection();
    }

    pub fn move_last(&mut self) {
        self.cursor = self.prompts().len().saturating_sub(1);
        self.sync_table_selection();
    }

    /// Keep the cursor inside the projection, which can shrink when a
    /// favorite is removed while the favorites filter is active.
    fn clamp_cursor(&mut self) {
        let len = self.prompts().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.sync_table_selection();
    }

    fn sync_table_selection(&mut self) {
        if self.prompts().is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(self.cursor));
        }
    }
}
