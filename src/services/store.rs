//! Table store client.
//!
//! Talks to the hosted PostgREST endpoint (`/rest/v1/<table>`) with the
//! project's anonymous key. Every call is a filtered, ordered select; the
//! client never writes.

use crate::models::config::StoreConfig;
use crate::models::media::{Episode, Movie, Season, TvShow};
use crate::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Filter for movies that are standalone or the first part of a series.
const STANDALONE_OR_PART_ONE: &str = "(part_number.is.null,part_number.eq.1)";
/// Per-table cap for substring search.
pub const SEARCH_LIMIT_PER_TABLE: usize = 10;

/// Movies and shows matched by a substring search.
#[derive(Debug, Clone, Default)]
pub struct ContentSearchResults {
    pub movies: Vec<Movie>,
    pub tv_shows: Vec<TvShow>,
}

impl ContentSearchResults {
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.tv_shows.is_empty()
    }
}

/// Read access to the catalog tables.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Active standalone/part-one movies, newest first.
    async fn get_movies(&self, limit: usize, offset: usize) -> Result<Vec<Movie>>;
    /// Active shows, newest first.
    async fn get_tv_shows(&self, limit: usize, offset: usize) -> Result<Vec<TvShow>>;
    async fn get_movie_by_id(&self, id: &str) -> Result<Option<Movie>>;
    /// A show by id; with `active_only` a hidden show is reported as absent.
    async fn get_tv_show_by_id(&self, id: &str, active_only: bool) -> Result<Option<TvShow>>;
    /// Stored seasons, ascending.
    async fn get_seasons(&self, tv_show_id: &str) -> Result<Vec<Season>>;
    /// All episodes of a show, ordered by (season, episode) ascending.
    async fn get_episodes(&self, tv_show_id: &str) -> Result<Vec<Episode>>;
    /// Substring match on movie titles and show names.
    async fn search_content(&self, query: &str) -> Result<ContentSearchResults>;
}

/// PostgREST client for the hosted table store.
pub struct StoreClient {
    rest_url: String,
    anon_key: String,
    client: reqwest::Client,
}

impl StoreClient {
    /// Create a client for a project URL such as `https://xyz.supabase.co`.
    pub fn new(project_url: &str, anon_key: impl Into<String>) -> Self {
        Self::with_client(project_url, anon_key, reqwest::Client::new())
    }

    fn with_client(project_url: &str, anon_key: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            rest_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            anon_key: anon_key.into(),
            client,
        }
    }

    /// Create a client from the application configuration.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let url = config.url.as_deref().ok_or(crate::Error::StoreUrlMissing)?;
        let key = config
            .anon_key
            .clone()
            .ok_or(crate::Error::StoreKeyMissing)?;

        let mut builder = reqwest::Client::builder();
        if config.timeout > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout));
        }
        Ok(Self::with_client(url, key, builder.build()?))
    }

    /// Run a select against a table and decode the rows.
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.rest_url, table);
        let resp = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .query(&[("select", "*")])
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(crate::Error::Store {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Check the endpoint answers with the configured key.
    pub async fn ping(&self) -> Result<bool> {
        match self
            .select::<serde_json::Value>("movies", &[("limit", "1".to_string())])
            .await
        {
            Ok(_) => Ok(true),
            Err(crate::Error::Store { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl CatalogStore for StoreClient {
    async fn get_movies(&self, limit: usize, offset: usize) -> Result<Vec<Movie>> {
        let movies: Vec<Movie> = self
            .select(
                "movies",
                &[
                    ("status", "eq.active".to_string()),
                    ("or", STANDALONE_OR_PART_ONE.to_string()),
                    ("order", "created_at.desc".to_string()),
                    ("offset", offset.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        Ok(movies
            .into_iter()
            .filter(Movie::is_standalone_or_first_part)
            .collect())
    }

    async fn get_tv_shows(&self, limit: usize, offset: usize) -> Result<Vec<TvShow>> {
        self.select(
            "tv_shows",
            &[
                ("status", "eq.active".to_string()),
                ("order", "created_at.desc".to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn get_movie_by_id(&self, id: &str) -> Result<Option<Movie>> {
        let rows: Vec<Movie> = self
            .select(
                "movies",
                &[("id", format!("eq.{}", id)), ("limit", "1".to_string())],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn get_tv_show_by_id(&self, id: &str, active_only: bool) -> Result<Option<TvShow>> {
        let mut params = vec![("id", format!("eq.{}", id)), ("limit", "1".to_string())];
        if active_only {
            params.push(("status", "eq.active".to_string()));
        }
        let rows: Vec<TvShow> = self.select("tv_shows", &params).await?;
        Ok(rows.into_iter().next())
    }

    async fn get_seasons(&self, tv_show_id: &str) -> Result<Vec<Season>> {
        self.select(
            "seasons",
            &[
                ("tv_show_id", format!("eq.{}", tv_show_id)),
                ("order", "season_number.asc".to_string()),
            ],
        )
        .await
    }

    async fn get_episodes(&self, tv_show_id: &str) -> Result<Vec<Episode>> {
        self.select(
            "episodes",
            &[
                ("tv_show_id", format!("eq.{}", tv_show_id)),
                ("order", "season_number.asc,episode_number.asc".to_string()),
            ],
        )
        .await
    }

    async fn search_content(&self, query: &str) -> Result<ContentSearchResults> {
        let pattern = format!("ilike.*{}*", query.trim());
        let limit = SEARCH_LIMIT_PER_TABLE.to_string();

        let movies_params = [
            ("status", "eq.active".to_string()),
            ("or", STANDALONE_OR_PART_ONE.to_string()),
            ("title", pattern.clone()),
            ("limit", limit.clone()),
        ];
        let shows_params = [
            ("status", "eq.active".to_string()),
            ("name", pattern),
            ("limit", limit),
        ];

        let (movies, tv_shows) = futures::future::join(
            self.select::<Movie>("movies", &movies_params),
            self.select::<TvShow>("tv_shows", &shows_params),
        )
        .await;

        // One table failing still returns the other's matches.
        let movies = movies.unwrap_or_else(|e| {
            tracing::warn!("Movie search failed: {}", e);
            Vec::new()
        });
        let tv_shows = tv_shows.unwrap_or_else(|e| {
            tracing::warn!("TV show search failed: {}", e);
            Vec::new()
        });

        Ok(ContentSearchResults {
            movies: movies
                .into_iter()
                .filter(Movie::is_standalone_or_first_part)
                .collect(),
            tv_shows,
        })
    }
}
