//! Client-local watchlist and continue-watching history.
//!
//! Both stores are created once at the application root and handed to
//! whatever needs them. Every mutation is written through to disk.

use crate::models::media::{MediaType, WatchlistItem};
use crate::models::progress::WatchProgress;
use crate::utils::fs::{read_json_or_default, write_json_with_backup};
use crate::Result;
use std::path::{Path, PathBuf};

/// The saved-titles set, keyed by `(id, media type)`.
#[derive(Debug)]
pub struct WatchlistStore {
    path: PathBuf,
    items: Vec<WatchlistItem>,
}

impl WatchlistStore {
    /// Load the watchlist from `path`, starting empty when absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut items: Vec<WatchlistItem> = read_json_or_default(&path)?;

        // Older files may hold duplicates; keep the first of each key.
        let mut seen = std::collections::HashSet::new();
        items.retain(|item| seen.insert((item.id.clone(), item.media_type)));

        tracing::debug!("Loaded {} watchlist items from {}", items.len(), path.display());
        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn items(&self) -> &[WatchlistItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str, media_type: MediaType) -> bool {
        self.items.iter().any(|i| i.key() == (id, media_type))
    }

    /// Add an item. Returns false if it was already present.
    pub fn add(&mut self, item: WatchlistItem) -> Result<bool> {
        if self.contains(&item.id, item.media_type) {
            return Ok(false);
        }
        tracing::info!("Added {} {} to watchlist", item.media_type, item.title);
        self.items.push(item);
        self.save()?;
        Ok(true)
    }

    /// Remove an item. Returns false if it was not present.
    pub fn remove(&mut self, id: &str, media_type: MediaType) -> Result<bool> {
        let before = self.items.len();
        self.items.retain(|i| i.key() != (id, media_type));
        if self.items.len() == before {
            return Ok(false);
        }
        tracing::info!("Removed {} {} from watchlist", media_type, id);
        self.save()?;
        Ok(true)
    }

    /// Add when absent, remove when present. Returns whether the item is
    /// in the list afterwards.
    pub fn toggle(&mut self, item: WatchlistItem) -> Result<bool> {
        if self.contains(&item.id, item.media_type) {
            let (id, media_type) = (item.id, item.media_type);
            self.remove(&id, media_type)?;
            Ok(false)
        } else {
            self.add(item)?;
            Ok(true)
        }
    }

    fn save(&self) -> Result<()> {
        write_json_with_backup(&self.path, &self.items)
    }
}

/// Playback positions, most recently watched first.
#[derive(Debug)]
pub struct WatchHistory {
    path: PathBuf,
    records: Vec<WatchProgress>,
}

impl WatchHistory {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut records: Vec<WatchProgress> = read_json_or_default(&path)?;
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(Self { path, records })
    }

    /// Record a position. Replaces the previous record for the same title
    /// and moves it to the front.
    pub fn record(&mut self, mut progress: WatchProgress) -> Result<()> {
        if progress.updated_at.is_empty() {
            progress.updated_at = chrono::Utc::now().to_rfc3339();
        }
        let key = (progress.id.clone(), progress.media_type);
        self.records
            .retain(|r| (r.id.as_str(), r.media_type) != (key.0.as_str(), key.1));
        self.records.insert(0, progress);
        self.save()
    }

    pub fn get(&self, id: &str, media_type: MediaType) -> Option<&WatchProgress> {
        self.records.iter().find(|r| r.key() == (id, media_type))
    }

    pub fn forget(&mut self, id: &str, media_type: MediaType) -> Result<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.key() != (id, media_type));
        if self.records.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Records for the continue-watching row, newest first.
    pub fn continue_watching(&self) -> &[WatchProgress] {
        &self.records
    }

    fn save(&self) -> Result<()> {
        write_json_with_backup(&self.path, &self.records)
    }
}
