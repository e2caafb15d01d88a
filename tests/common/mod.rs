//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use stream_catalog::models::media::{Episode, Genre, Movie, Season, TvShow};
use stream_catalog::services::store::{CatalogStore, ContentSearchResults};
use stream_catalog::{Error, Result};

pub fn movie(id: &str, votes: u32, avg: f32, genres: &[u64]) -> Movie {
    Movie {
        id: id.to_string(),
        title: format!("Movie {}", id),
        vote_count: Some(votes),
        vote_average: Some(avg),
        genres: genres
            .iter()
            .map(|g| Genre {
                id: *g,
                name: format!("Genre {}", g),
            })
            .collect(),
        status: Some("active".to_string()),
        embed_url: Some(format!("https://player.example.com/embed/movie/{}", id)),
        ..Default::default()
    }
}

pub fn show(id: &str, votes: u32, avg: f32, genres: &[u64]) -> TvShow {
    TvShow {
        id: id.to_string(),
        name: format!("Show {}", id),
        vote_count: Some(votes),
        vote_average: Some(avg),
        genres: genres
            .iter()
            .map(|g| Genre {
                id: *g,
                name: format!("Genre {}", g),
            })
            .collect(),
        status: Some("active".to_string()),
        ..Default::default()
    }
}

pub fn episode(show_id: &str, season: u32, number: u32) -> Episode {
    Episode {
        id: format!("{}-{}-{}", show_id, season, number),
        tv_show_id: show_id.to_string(),
        season_number: season,
        episode_number: number,
        name: Some(format!("Episode {}x{}", season, number)),
        embed_url: Some(format!(
            "https://player.example.com/embed/tv/{}/{}/{}",
            show_id, season, number
        )),
        ..Default::default()
    }
}

/// In-memory table store.
#[derive(Default)]
pub struct FakeStore {
    pub movies: Vec<Movie>,
    pub shows: Vec<TvShow>,
    pub episodes: Vec<Episode>,
    pub seasons: Vec<Season>,
    pub fail_movies: bool,
    pub fail_episodes: bool,
    pub search_calls: AtomicUsize,
}

fn unavailable() -> Error {
    Error::Store {
        status: 503,
        message: "unavailable".to_string(),
    }
}

#[async_trait]
impl CatalogStore for FakeStore {
    async fn get_movies(&self, limit: usize, offset: usize) -> Result<Vec<Movie>> {
        if self.fail_movies {
            return Err(unavailable());
        }
        Ok(self
            .movies
            .iter()
            .filter(|m| m.is_active())
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_tv_shows(&self, limit: usize, offset: usize) -> Result<Vec<TvShow>> {
        Ok(self
            .shows
            .iter()
            .filter(|t| t.is_active())
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_movie_by_id(&self, id: &str) -> Result<Option<Movie>> {
        Ok(self.movies.iter().find(|m| m.id == id).cloned())
    }

    async fn get_tv_show_by_id(&self, id: &str, active_only: bool) -> Result<Option<TvShow>> {
        Ok(self
            .shows
            .iter()
            .find(|t| t.id == id && (!active_only || t.is_active()))
            .cloned())
    }

    async fn get_seasons(&self, tv_show_id: &str) -> Result<Vec<Season>> {
        Ok(self
            .seasons
            .iter()
            .filter(|s| s.tv_show_id == tv_show_id)
            .cloned()
            .collect())
    }

    async fn get_episodes(&self, tv_show_id: &str) -> Result<Vec<Episode>> {
        if self.fail_episodes {
            return Err(unavailable());
        }
        Ok(self
            .episodes
            .iter()
            .filter(|e| e.tv_show_id == tv_show_id)
            .cloned()
            .collect())
    }

    async fn search_content(&self, query: &str) -> Result<ContentSearchResults> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let needle = query.to_lowercase();
        Ok(ContentSearchResults {
            movies: self
                .movies
                .iter()
                .filter(|m| m.title.to_lowercase().contains(&needle))
                .take(10)
                .cloned()
                .collect(),
            tv_shows: self
                .shows
                .iter()
                .filter(|t| t.name.to_lowercase().contains(&needle))
                .take(10)
                .cloned()
                .collect(),
        })
    }
}
