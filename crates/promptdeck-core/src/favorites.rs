use std::collections::BTreeSet;

use crate::storage::KeyValueStore;

/// Storage key holding the favorites as a JSON array of ids.
pub const FAVORITES_KEY: &str = "favorites";

/// Set of favorited prompt ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: BTreeSet<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Add `id` if absent, remove it if present. Returns true when added.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Favorites {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    Removed,
}

/// Favorites kept in sync with a key-value store.
///
/// The in-memory set is authoritative: storage failures are logged and
/// never propagate to the caller.
pub struct FavoritesStore<S> {
    store: S,
    favorites: Favorites,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn open(store: S) -> Self {
        let favorites = Self::load(&store);
        Self { store, favorites }
    }

    /// Read the favorites from storage, falling back to the empty set.
    pub fn load(store: &S) -> Favorites {
        let raw = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Favorites::new(),
            Err(e) => {
                tracing::warn!("Failed to read favorites, starting empty: {}", e);
                return Favorites::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => {
                tracing::debug!("Loaded {} favorites", ids.len());
                ids.into_iter().collect()
            }
            Err(e) => {
                tracing::warn!("Ignoring malformed favorites entry: {}", e);
                Favorites::new()
            }
        }
    }

    pub fn toggle(&mut self, id: &str) -> FavoriteChange {
        let change = if self.favorites.toggle(id) {
            FavoriteChange::Added
        } else {
            FavoriteChange::Removed
        };
        self.persist();
        change
    }

    /// Write the full set, overwriting whatever was stored before.
    pub fn persist(&mut self) {
        let ids: Vec<&str> = self.favorites.iter().collect();
        let value = match serde_json::to_string(&ids) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to encode favorites: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(FAVORITES_KEY, &value) {
            tracing::warn!("Failed to persist favorites, keeping them for this session: {}", e);
        }
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
