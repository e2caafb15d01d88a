//! Continue-watching records.

use super::media::MediaType;
use serde::{Deserialize, Serialize};

/// Playback position for one title, kept on this device only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchProgress {
    pub id: String,
    pub media_type: MediaType,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Season of the last watched episode. Ignored for movies.
    #[serde(default)]
    pub season: Option<u32>,
    /// Last watched episode. Ignored for movies.
    #[serde(default)]
    pub episode: Option<u32>,
    /// Seconds watched.
    pub watched_duration: f64,
    /// Total length in seconds.
    pub full_duration: f64,
    /// RFC 3339 timestamp of the last update.
    pub updated_at: String,
}

impl WatchProgress {
    pub fn key(&self) -> (&str, MediaType) {
        (&self.id, self.media_type)
    }
}
