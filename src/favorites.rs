use async_trait::async_trait;
use log::{debug, error, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::BrowserError;

/// Key used for the favorites list when none is configured
pub const DEFAULT_FAVORITES_KEY: &str = "recipeFavorites";

/// Key-value persistence collaborator
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, BrowserError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), BrowserError>;
}

/// In-process store; contents vanish with the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.into(), value.into());
        }
        store
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BrowserError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| BrowserError::Storage(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BrowserError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| BrowserError::Storage(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object file mapping keys to string values.
/// A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_entries(&self) -> Result<HashMap<String, String>, BrowserError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BrowserError> {
        let mut entries = self.read_entries().await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BrowserError> {
        let mut entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(BrowserError::Json(e)) => {
                warn!(
                    "Discarding unreadable store {}: {}",
                    self.path.display(),
                    e
                );
                HashMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&entries)?;
        tokio::fs::write(&self.path, json).await?;
        debug!("Wrote {} to {}", key, self.path.display());
        Ok(())
    }
}

/// Set of favorited recipe ids, kept in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: Vec<u32>,
}

impl Favorites {
    pub fn from_ids(ids: impl IntoIterator<Item = u32>) -> Self {
        let mut favorites = Self::default();
        for id in ids {
            if !favorites.contains(id) {
                favorites.ids.push(id);
            }
        }
        favorites
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Add the id if absent, remove it if present. Returns whether the id
    /// is a favorite afterwards.
    pub fn toggle(&mut self, id: u32) -> bool {
        match self.ids.iter().position(|&f| f == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        }
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Favorites persisted through a [`KeyValueStore`] as a JSON array of ids.
///
/// The in-memory set is the source of truth for the session: read failures
/// yield an empty set and write failures are only logged.
pub struct FavoritesStore {
    store: Box<dyn KeyValueStore>,
    key: String,
    favorites: Favorites,
}

impl FavoritesStore {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            favorites: Favorites::default(),
        }
    }

    /// Replace the in-memory set with the persisted one
    pub async fn load_favorites(&mut self) -> &Favorites {
        self.favorites = match self.read().await {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!("Failed to load favorites, starting empty: {}", e);
                Favorites::default()
            }
        };
        debug!("Loaded {} favorites", self.favorites.len());
        &self.favorites
    }

    async fn read(&self) -> Result<Favorites, BrowserError> {
        match self.store.get(&self.key).await? {
            Some(raw) if !raw.trim().is_empty() => {
                let ids: Vec<u32> = serde_json::from_str(&raw)?;
                Ok(Favorites::from_ids(ids))
            }
            _ => Ok(Favorites::default()),
        }
    }

    /// Flip one id and persist the result immediately
    pub async fn toggle_favorite(&mut self, id: u32) -> bool {
        let now_favorite = self.favorites.toggle(id);
        debug!(
            "Recipe {} {} favorites",
            id,
            if now_favorite { "added to" } else { "removed from" }
        );
        self.save_favorites().await;
        now_favorite
    }

    async fn save_favorites(&self) {
        let result = match serde_json::to_string(self.favorites.ids()) {
            Ok(json) => self.store.set(&self.key, &json).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            error!("Failed to save favorites: {}", e);
        }
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, BrowserError> {
            Err(BrowserError::Storage("unavailable".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), BrowserError> {
            Err(BrowserError::Storage("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let mut favorites = Favorites::from_ids([3, 5]);
        let original = favorites.clone();

        assert!(favorites.toggle(1));
        assert!(!favorites.toggle(1));
        assert_eq!(favorites, original);
    }

    #[test]
    fn test_from_ids_collapses_duplicates() {
        let favorites = Favorites::from_ids([2, 2, 7, 2]);
        assert_eq!(favorites.ids(), &[2, 7]);
    }

    #[tokio::test]
    async fn test_load_missing_key_is_empty() {
        let mut store = FavoritesStore::new(Box::new(MemoryStore::new()), DEFAULT_FAVORITES_KEY);
        assert!(store.load_favorites().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_data_is_empty() {
        let memory = MemoryStore::with_entry(DEFAULT_FAVORITES_KEY, "{not json");
        let mut store = FavoritesStore::new(Box::new(memory), DEFAULT_FAVORITES_KEY);
        assert!(store.load_favorites().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_read_failure_is_empty() {
        let mut store = FavoritesStore::new(Box::new(BrokenStore), DEFAULT_FAVORITES_KEY);
        assert!(store.load_favorites().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_keeps_toggle() {
        let mut store = FavoritesStore::new(Box::new(BrokenStore), DEFAULT_FAVORITES_KEY);
        assert!(store.toggle_favorite(4).await);
        assert!(store.is_favorite(4));
    }

    #[tokio::test]
    async fn test_toggle_persists_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");

        let mut store = FavoritesStore::new(Box::new(FileStore::new(&path)), "favs");
        store.load_favorites().await;
        store.toggle_favorite(1).await;
        store.toggle_favorite(3).await;

        let mut reopened = FavoritesStore::new(Box::new(FileStore::new(&path)), "favs");
        assert_eq!(reopened.load_favorites().await.ids(), &[1, 3]);

        let raw = FileStore::new(&path).get("favs").await.unwrap();
        assert_eq!(raw.as_deref(), Some("[1,3]"));
    }

    #[tokio::test]
    async fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_set_replaces_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        for contents in ["not json at all", "[1, 2, 3]", "\"just a string\""] {
            std::fs::write(&path, contents).unwrap();
            let store = FileStore::new(&path);
            assert!(store.get("favs").await.is_err());

            store.set("favs", "[9]").await.unwrap();
            assert_eq!(store.get("favs").await.unwrap().as_deref(), Some("[9]"));
        }
    }

    #[tokio::test]
    async fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();

        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }
}
