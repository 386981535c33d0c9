use std::time::Duration;

use async_trait::async_trait;
use promptdeck_core::{
    Catalog, Category, Clipboard, ClipboardError, Deck, FileStore, Filter, KeyValueStore, MemoryStore,
    Notification, Severity, COPY_FEEDBACK_WINDOW, FAVORITES_KEY,
};
use tokio::time::Instant;

#[derive(Default)]
struct RecordingClipboard {
    written: Vec<String>,
}

#[async_trait(?Send)]
impl Clipboard for RecordingClipboard {
    async fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.written.push(text.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn selecting_lend_and_borrow_shows_aave_only_from_that_category() {
    let (mut deck, _expiries) = Deck::new(
        Catalog::builtin(),
        MemoryStore::new(),
        RecordingClipboard::default(),
        Vec::<Notification>::new(),
    );

    deck.select_filter(Filter::from_label("Lend & Borrow").unwrap());
    let projected = deck.projected();

    let aave = projected.iter().find(|p| p.id == "7").unwrap();
    assert_eq!(aave.protocol, "Aave");
    assert!(projected.iter().all(|p| p.category == Category::LendBorrow));
}

#[tokio::test]
async fn favoriting_one_prompt_then_filtering_by_favorites() {
    let (mut deck, _expiries) = Deck::new(
        Catalog::builtin(),
        MemoryStore::new(),
        RecordingClipboard::default(),
        Vec::<Notification>::new(),
    );
    assert!(deck.favorites().is_empty());

    deck.toggle_favorite("3");
    assert_eq!(deck.favorites().iter().collect::<Vec<_>>(), vec!["3"]);
    assert_eq!(deck.store().raw(FAVORITES_KEY), Some("[\"3\"]"));

    deck.select_filter(Filter::Favorites);
    let projected = deck.projected();
    assert_eq!(projected.len(), 1);
    assert_eq!(projected[0].id, "3");

    let notification = deck.notifier().last().unwrap();
    assert_eq!(notification.message, "Added to favorites");
}

#[tokio::test(start_paused = true)]
async fn copying_prompt_one_flags_it_for_two_seconds() {
    let (mut deck, mut expiries) = Deck::new(
        Catalog::builtin(),
        MemoryStore::new(),
        RecordingClipboard::default(),
        Vec::<Notification>::new(),
    );
    let start = Instant::now();

    deck.copy_prompt("1").await.unwrap();
    assert_eq!(
        deck.clipboard().written,
        vec!["Stake 1 ETH into stETH using Lido on Ethereum"]
    );

    let copied: Vec<String> = deck
        .projected()
        .into_iter()
        .filter(|p| p.just_copied)
        .map(|p| p.id)
        .collect();
    assert_eq!(copied, vec!["1"]);
    assert_eq!(deck.notifier().last().unwrap().severity, Severity::Success);

    let expired = expiries.recv().await.unwrap();
    assert!(start.elapsed() >= COPY_FEEDBACK_WINDOW);
    assert!(deck.expire(expired));
    assert!(deck.projected().iter().all(|p| !p.just_copied));
}

#[tokio::test(start_paused = true)]
async fn rapid_copies_keep_the_flag_until_the_last_window_ends() {
    let (mut deck, mut expiries) = Deck::new(
        Catalog::builtin(),
        MemoryStore::new(),
        RecordingClipboard::default(),
        Vec::<Notification>::new(),
    );

    for _ in 0..5 {
        deck.copy_prompt("1").await.unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(deck.is_copied("1"));
        assert!(expiries.try_recv().is_err());
    }

    // Last copy at 2400ms, now at 3000ms
    tokio::time::sleep(Duration::from_millis(1399)).await;
    assert!(expiries.try_recv().is_err());

    let expired = expiries.recv().await.unwrap();
    assert!(deck.expire(expired));
    assert!(!deck.is_copied("1"));
}

#[tokio::test]
async fn favorites_survive_a_restart_with_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let (mut deck, _expiries) = Deck::new(
            Catalog::builtin(),
            FileStore::new(&path),
            RecordingClipboard::default(),
            Vec::<Notification>::new(),
        );
        deck.toggle_favorite("12");
        deck.toggle_favorite("4");
        deck.toggle_favorite("8");
        deck.toggle_favorite("4");
    }

    let (mut deck, _expiries) = Deck::new(
        Catalog::builtin(),
        FileStore::new(&path),
        RecordingClipboard::default(),
        Vec::<Notification>::new(),
    );
    deck.select_filter(Filter::Favorites);

    let ids: Vec<String> = deck.projected().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["8", "12"]);
    assert_eq!(deck.active_filter(), Filter::Favorites);
}

#[tokio::test]
async fn corrupt_storage_starts_with_no_favorites() {
    let mut store = MemoryStore::new();
    store.set(FAVORITES_KEY, "[\"1\",").unwrap();

    let (deck, _expiries) = Deck::new(
        Catalog::builtin(),
        store,
        RecordingClipboard::default(),
        Vec::<Notification>::new(),
    );

    assert!(deck.favorites().is_empty());
    assert!(deck.notifier().is_empty());
}
