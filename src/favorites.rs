//! Favorites storage (`SQLite`)

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use crate::paths;

/// A saved favorite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    /// MyAnimeList id
    pub anime_id: u32,
    /// Title at the time it was saved
    pub title: String,
    /// When it was saved
    pub added_at: DateTime<Utc>,
}

/// Durable set of favorite anime, keyed by id
pub struct FavoritesStore {
    conn: Connection,
}

impl FavoritesStore {
    /// Open or create the store at the default location
    pub fn open() -> Result<Self> {
        let path = Self::default_path()?;
        Self::open_path(&path)
    }

    /// Open or create the store at a specific path
    pub fn open_path(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let conn = Connection::open(path).context("Failed to open favorites database")?;

        let store = Self { conn };
        store.init()?;

        Ok(store)
    }

    /// Get the default database path
    pub fn default_path() -> Result<PathBuf> {
        paths::database_path()
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS favorites (
                anime_id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                added_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_favorites_added_at ON favorites(added_at);
            ",
        )?;
        Ok(())
    }

    /// Whether `id` is a favorite
    pub fn is_favorite(&self, id: u32) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM favorites WHERE anime_id = ?1",
                params![id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Flip the favorite flag for `id`; returns the new state
    pub fn toggle(&self, id: u32, title: &str) -> Result<bool> {
        if self.is_favorite(id)? {
            self.remove(id)?;
            tracing::info!("Removed favorite {id}");
            Ok(false)
        } else {
            self.conn.execute(
                "INSERT INTO favorites (anime_id, title, added_at) VALUES (?1, ?2, ?3)",
                params![id, title, Utc::now().to_rfc3339()],
            )?;
            tracing::info!("Added favorite {id} ({title})");
            Ok(true)
        }
    }

    /// Remove `id` from favorites. Returns `false` when it was not a favorite.
    pub fn remove(&self, id: u32) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM favorites WHERE anime_id = ?1", params![id])?;
        if removed > 0 {
            tracing::info!("Removed favorite {id}");
        }
        Ok(removed > 0)
    }

    /// All favorite ids
    pub fn ids(&self) -> Result<HashSet<u32>> {
        let mut stmt = self.conn.prepare("SELECT anime_id FROM favorites")?;
        let ids = stmt.query_map([], |row| row.get::<_, u32>(0))?;
        ids.collect::<Result<HashSet<_>, _>>().map_err(Into::into)
    }

    /// All favorites, most recent first
    pub fn list(&self) -> Result<Vec<Favorite>> {
        let mut stmt = self
            .conn
            .prepare("SELECT anime_id, title, added_at FROM favorites ORDER BY added_at DESC")?;

        let favorites = stmt.query_map([], |row| {
            let added_at: String = row.get(2)?;
            Ok(Favorite {
                anime_id: row.get(0)?,
                title: row.get(1)?,
                added_at: DateTime::parse_from_rfc3339(&added_at)
                    .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc)),
            })
        })?;

        favorites.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_store_init() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("favorites.sqlite");
        let store = FavoritesStore::open_path(&path).unwrap();
        assert!(store.ids().unwrap().is_empty());
    }

    #[test]
    fn test_toggle() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::open_path(&dir.path().join("favorites.sqlite")).unwrap();

        assert!(!store.is_favorite(1).unwrap());
        assert!(store.toggle(1, "Cowboy Bebop").unwrap());
        assert!(store.toggle(20, "Naruto").unwrap());
        assert!(store.is_favorite(1).unwrap());
        assert_eq!(store.ids().unwrap(), HashSet::from([1, 20]));

        assert!(!store.toggle(1, "Cowboy Bebop").unwrap());
        assert!(!store.is_favorite(1).unwrap());
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_reports_missing() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::open_path(&dir.path().join("favorites.sqlite")).unwrap();
        store.toggle(1, "Cowboy Bebop").unwrap();

        assert!(!store.remove(20).unwrap());
        assert!(store.remove(1).unwrap());
        assert!(!store.remove(1).unwrap());
        assert!(store.ids().unwrap().is_empty());
    }

    #[test]
    fn test_favorites_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.sqlite");
        {
            let store = FavoritesStore::open_path(&path).unwrap();
            store.toggle(5114, "Fullmetal Alchemist: Brotherhood").unwrap();
        }

        let store = FavoritesStore::open_path(&path).unwrap();
        let favorites = store.list().unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].anime_id, 5114);
        assert_eq!(favorites[0].title, "Fullmetal Alchemist: Brotherhood");
    }
}
