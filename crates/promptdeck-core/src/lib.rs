//! UI-agnostic core of the prompt catalog browser.
//!
//! Everything here can be driven without a terminal: the TUI crate only
//! renders [`Deck::projected`] and forwards user intents.

pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod deck;
pub mod error;
pub mod favorites;
pub mod feedback;
pub mod notify;
pub mod projector;
pub mod selection;
pub mod storage;

// Re-export main types for convenience
pub use catalog::{Catalog, Category, Prompt};
pub use clipboard::Clipboard;
pub use config::Config;
pub use deck::{Deck, Intent};
pub use error::{CatalogError, ClipboardError, CopyError, StorageError};
pub use favorites::{FavoriteChange, Favorites, FavoritesStore, FAVORITES_KEY};
pub use feedback::{CopyFeedback, Expired, COPY_FEEDBACK_WINDOW};
pub use notify::{Notification, Notifier, Placement, Severity};
pub use projector::{project, project_view, ProjectedPrompt};
pub use selection::{Filter, Selection, ViewMode};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
