use anyhow::{Context, Result};
use cinedex_core::domain::{HistoryEntry, Movie};
use cinedex_core::ports::{FavoritesStore, HistoryStore};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed per-user persistence for favorites and history.
///
/// One JSON file per user and concern: `{user}_favorites.json` holds the
/// array of currently-favorited movie records, `{user}_history.json` the
/// activity log in insertion order. A missing file reads as empty; every
/// save rewrites the whole artifact.
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn favorites_path(&self, user: &str) -> PathBuf {
        self.data_dir.join(format!("{}_favorites.json", user))
    }

    pub fn history_path(&self, user: &str) -> PathBuf {
        self.data_dir.join(format!("{}_history.json", user))
    }

    fn read_or_empty<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn write_json<T: serde::Serialize>(&self, path: &Path, items: &[T]) -> Result<()> {
        fs::create_dir_all(&self.data_dir).context("Failed to create data directory")?;
        let contents = serde_json::to_string_pretty(items).context("Failed to serialize")?;
        fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
    }
}

impl FavoritesStore for JsonFileStore {
    fn load(&self, user: &str) -> Result<Vec<Movie>> {
        Self::read_or_empty(&self.favorites_path(user))
    }

    fn save(&self, user: &str, favorites: &[Movie]) -> Result<()> {
        self.write_json(&self.favorites_path(user), favorites)
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self, user: &str) -> Result<Vec<HistoryEntry>> {
        Self::read_or_empty(&self.history_path(user))
    }

    fn save(&self, user: &str, entries: &[HistoryEntry]) -> Result<()> {
        self.write_json(&self.history_path(user), entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cinedex_core::domain::HistoryAction;
    use tempfile::TempDir;

    fn movie(title: &str, year: i32) -> Movie {
        Movie {
            title: title.to_string(),
            year,
            genre: vec!["Drama".to_string()],
            director: "Someone".to_string(),
            rating: 8.0,
            emoji: "🎭".to_string(),
            is_favorite: true,
            date_added: Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_favorites_roundtrip_and_file_naming() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = JsonFileStore::new(temp_dir.path());

        let favorites = vec![movie("Heat", 1995), movie("Ran", 1985)];
        FavoritesStore::save(&store, "alice", &favorites)?;

        assert!(temp_dir.path().join("alice_favorites.json").exists());

        let loaded = FavoritesStore::load(&store, "alice")?;
        assert_eq!(loaded, favorites);

        // Another user's file is independent
        let other = FavoritesStore::load(&store, "bob")?;
        assert!(other.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_files_read_as_empty() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = JsonFileStore::new(temp_dir.path());

        assert!(FavoritesStore::load(&store, "nobody")?.is_empty());
        assert!(HistoryStore::load(&store, "nobody")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_history_roundtrip_preserves_insertion_order() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = JsonFileStore::new(temp_dir.path());

        let base = Utc.with_ymd_and_hms(2026, 8, 29, 10, 0, 0).unwrap();
        let entries: Vec<HistoryEntry> = (0..3)
            .map(|i| HistoryEntry {
                title: format!("Movie {}", i),
                year: 2000 + i,
                genre: vec![],
                emoji: String::new(),
                action: HistoryAction::Viewed,
                timestamp: base + chrono::Duration::minutes(i as i64),
            })
            .collect();

        HistoryStore::save(&store, "alice", &entries)?;
        let loaded = HistoryStore::load(&store, "alice")?;
        assert_eq!(loaded, entries);
        Ok(())
    }

    #[test]
    fn test_saving_empty_log_persists_empty_array() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = JsonFileStore::new(temp_dir.path());

        HistoryStore::save(&store, "alice", &[])?;
        let contents = fs::read_to_string(store.history_path("alice"))?;
        assert_eq!(contents.trim(), "[]");
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_an_error_not_a_panic() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = JsonFileStore::new(temp_dir.path());
        fs::write(store.favorites_path("alice"), "{ broken")?;

        assert!(FavoritesStore::load(&store, "alice").is_err());
        Ok(())
    }
}
