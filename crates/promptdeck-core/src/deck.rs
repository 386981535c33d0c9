//! The controller that owns all browsing state.
//!
//! The presentation layer only reads projections from a [`Deck`] and sends
//! it intents; it never mutates the catalog, favorites or flags directly.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::catalog::Catalog;
use crate::clipboard::Clipboard;
use crate::error::CopyError;
use crate::favorites::{FavoriteChange, Favorites, FavoritesStore};
use crate::feedback::{CopyFeedback, Expired};
use crate::notify::{Notification, Notifier, Placement, Severity, DEFAULT_NOTIFICATION_DURATION};
use crate::projector::{self, ProjectedPrompt};
use crate::selection::{Filter, Selection, ViewMode};
use crate::storage::KeyValueStore;

/// A user action the deck knows how to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectFilter(Filter),
    SetViewMode(ViewMode),
    ToggleViewMode,
    ToggleFavorite(String),
    CopyPrompt(String),
}

pub struct Deck<S, C, N> {
    catalog: Arc<Catalog>,
    favorites: FavoritesStore<S>,
    selection: Selection,
    feedback: CopyFeedback,
    clipboard: C,
    notifier: N,
    placement: Placement,
    notification_duration: Duration,
}

impl<S, C, N> Deck<S, C, N>
where
    S: KeyValueStore,
    C: Clipboard,
    N: Notifier,
{
    /// Build a deck, loading favorites from `store`.
    ///
    /// The returned receiver yields copy-feedback expiries, which must be fed
    /// back through [`Deck::expire`].
    pub fn new(
        catalog: Arc<Catalog>,
        store: S,
        clipboard: C,
        notifier: N,
    ) -> (Self, mpsc::UnboundedReceiver<Expired>) {
        let favorites = FavoritesStore::open(store);
        let (feedback, expiries) = CopyFeedback::new();

        tracing::info!(
            "Deck ready: {} prompts, {} favorites",
            catalog.len(),
            favorites.favorites().len()
        );

        let deck = Self {
            catalog,
            favorites,
            selection: Selection::default(),
            feedback,
            clipboard,
            notifier,
            placement: Placement::default(),
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
        };
        (deck, expiries)
    }

    pub fn with_notifications(mut self, placement: Placement, duration: Duration) -> Self {
        self.placement = placement;
        self.notification_duration = duration;
        self
    }

    pub async fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::SelectFilter(filter) => self.select_filter(filter),
            Intent::SetViewMode(mode) => self.set_view_mode(mode),
            Intent::ToggleViewMode => self.toggle_view_mode(),
            Intent::ToggleFavorite(id) => {
                self.toggle_favorite(&id);
            }
            Intent::CopyPrompt(id) => {
                // Failures are already reported through the notifier
                let _ = self.copy_prompt(&id).await;
            }
        }
    }

    pub fn select_filter(&mut self, filter: Filter) {
        tracing::debug!("Filter set to {}", filter.label());
        self.selection.set_filter(filter);
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        tracing::debug!("View mode set to {}", mode.as_str());
        self.selection.set_view_mode(mode);
    }

    pub fn toggle_view_mode(&mut self) {
        self.set_view_mode(self.selection.view_mode.toggled());
    }

    pub fn toggle_favorite(&mut self, id: &str) -> FavoriteChange {
        if !self.catalog.contains(id) {
            tracing::debug!("Toggling favorite for unknown prompt id {}", id);
        }

        let change = self.favorites.toggle(id);
        let message = match change {
            FavoriteChange::Added => "Added to favorites",
            FavoriteChange::Removed => "Removed from favorites",
        };
        self.emit(message, Severity::Success);
        change
    }

    /// Copy a prompt's text and flag it as copied for a short window.
    pub async fn copy_prompt(&mut self, id: &str) -> Result<(), CopyError> {
        let Some(prompt) = self.catalog.get(id) else {
            tracing::warn!("Copy requested for unknown prompt id {}", id);
            return Err(CopyError::UnknownPrompt(id.to_string()));
        };

        match self.clipboard.write_text(&prompt.text).await {
            Ok(()) => {
                tracing::info!("Copied prompt {} ({})", id, prompt.protocol);
                self.feedback.mark_copied(id);
                self.emit("Prompt copied to clipboard", Severity::Success);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to copy prompt {}: {}", id, e);
                self.emit("Failed to copy prompt", Severity::Error);
                Err(e.into())
            }
        }
    }

    pub fn expire(&mut self, expired: Expired) -> bool {
        self.feedback.expire(expired)
    }

    pub fn projected(&self) -> Vec<ProjectedPrompt> {
        projector::project_view(
            &self.catalog,
            self.favorites.favorites(),
            &self.selection,
            &self.feedback,
        )
    }

    /// How many prompts `filter` would show right now.
    pub fn count(&self, filter: &Filter) -> usize {
        projector::count(&self.catalog, self.favorites.favorites(), filter)
    }

    pub fn active_filter(&self) -> Filter {
        self.selection.filter
    }

    pub fn view_mode(&self) -> ViewMode {
        self.selection.view_mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn favorites(&self) -> &Favorites {
        self.favorites.favorites()
    }

    pub fn is_copied(&self, id: &str) -> bool {
        self.feedback.is_copied(id)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn store(&self) -> &S {
        self.favorites.store()
    }

    fn emit(&mut self, message: &str, severity: Severity) {
        self.notifier.notify(Notification {
            message: message.to_string(),
            severity,
            placement: self.placement,
            duration: self.notification_duration,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClipboardError;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;

    #[derive(Default)]
    struct FakeClipboard {
        written: Vec<String>,
        fail: bool,
    }

    #[async_trait(?Send)]
    impl Clipboard for FakeClipboard {
        async fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Unavailable("denied".to_string()));
            }
            self.written.push(text.to_string());
            Ok(())
        }
    }

    type TestDeck = Deck<MemoryStore, FakeClipboard, Vec<Notification>>;

    fn deck(clipboard: FakeClipboard) -> (TestDeck, mpsc::UnboundedReceiver<Expired>) {
        Deck::new(Catalog::builtin(), MemoryStore::new(), clipboard, Vec::new())
    }

    #[tokio::test]
    async fn test_copy_failure_leaves_flag_and_notifies() {
        let (mut deck, _expiries) = deck(FakeClipboard {
            fail: true,
            ..Default::default()
        });

        let result = deck.copy_prompt("1").await;

        assert!(matches!(result, Err(CopyError::Clipboard(_))));
        assert!(!deck.is_copied("1"));
        let last = deck.notifier().last().unwrap();
        assert_eq!(last.severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_copy_unknown_prompt() {
        let (mut deck, _expiries) = deck(FakeClipboard::default());

        let result = deck.copy_prompt("nope").await;

        assert_eq!(result, Err(CopyError::UnknownPrompt("nope".to_string())));
        assert!(deck.notifier().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_routes_intents() {
        let (mut deck, _expiries) = deck(FakeClipboard::default());

        deck.dispatch(Intent::ToggleFavorite("3".to_string())).await;
        deck.dispatch(Intent::SelectFilter(Filter::Favorites)).await;
        deck.dispatch(Intent::ToggleViewMode).await;
        deck.dispatch(Intent::CopyPrompt("3".to_string())).await;

        assert_eq!(deck.view_mode(), ViewMode::Table);
        let projected = deck.projected();
        assert_eq!(projected.len(), 1);
        assert!(projected[0].is_favorite);
        assert!(projected[0].just_copied);

        deck.dispatch(Intent::SetViewMode(ViewMode::Cards)).await;
        assert_eq!(deck.view_mode(), ViewMode::Cards);
    }

    #[tokio::test]
    async fn test_copy_and_favorite_flags_are_independent() {
        let (mut deck, _expiries) = deck(FakeClipboard::default());

        deck.copy_prompt("2").await.unwrap();
        assert_eq!(deck.clipboard().written, vec!["Stake 50% of my Solana using Marinade"]);
        deck.toggle_favorite("2");
        deck.toggle_favorite("2");

        assert!(deck.is_copied("2"));
        assert!(!deck.favorites().contains("2"));
    }

    #[tokio::test]
    async fn test_notifications_use_configured_style() {
        let (deck, _expiries) = deck(FakeClipboard::default());
        let mut deck = deck.with_notifications(Placement::TopRight, Duration::from_secs(5));

        deck.toggle_favorite("1");

        let last = deck.notifier().last().unwrap();
        assert_eq!(last.message, "Added to favorites");
        assert_eq!(last.placement, Placement::TopRight);
        assert_eq!(last.duration, Duration::from_secs(5));
    }
}
