//! Quick-search overlay.
//!
//! A [`SearchSession`] debounces keystrokes and runs the query against a
//! pluggable [`SearchBackend`]. Every keystroke gets a sequence number;
//! a response is applied only if no newer keystroke arrived meanwhile, so
//! a slow early query can never overwrite a later one.

use crate::core::routes::Route;
use crate::models::config::{Config, SearchBackendKind};
use crate::models::media::MediaType;
use crate::services::store::CatalogStore;
use crate::services::tmdb::{MultiSearchItem, TmdbClient, TmdbConfig};
use crate::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;

/// Delay after the last keystroke before a query is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
/// Result cap for the multi-search backend.
pub const MULTI_SEARCH_LIMIT: usize = 20;
/// Minimum votes for a multi-search hit to be shown.
const MIN_VOTE_COUNT: u32 = 3;

/// One search hit, whatever the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: String,
    pub media_type: MediaType,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub date: Option<String>,
    pub vote_average: Option<f32>,
}

impl SearchResult {
    /// Details page for this hit.
    pub fn route(&self) -> Route {
        Route::details(self.media_type, &self.id)
    }

    pub fn year(&self) -> Option<&str> {
        self.date.as_deref().and_then(|d| d.get(0..4))
    }
}

/// Something that can answer a search query.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    fn name(&self) -> &str;
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Keep titles with real ratings, drop people, cap the list.
pub fn filter_multi_results(items: Vec<MultiSearchItem>) -> Vec<SearchResult> {
    items
        .into_iter()
        .filter_map(|item| {
            let media_type = item.media_type.as_media_type()?;
            let rated = item.vote_average.unwrap_or(0.0) > 0.0
                && item.vote_count.unwrap_or(0) >= MIN_VOTE_COUNT;
            if !rated {
                return None;
            }
            Some(SearchResult {
                id: item.id.to_string(),
                media_type,
                title: item.display_title().to_string(),
                date: item.date().map(str::to_string),
                overview: item.overview,
                poster_path: item.poster_path,
                backdrop_path: item.backdrop_path,
                vote_average: item.vote_average,
            })
        })
        .take(MULTI_SEARCH_LIMIT)
        .collect()
}

/// Search through the metadata provider's multi-search.
pub struct TmdbSearch {
    client: TmdbClient,
}

impl TmdbSearch {
    pub fn new(client: TmdbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchBackend for TmdbSearch {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let page = self.client.search_multi(query, 1).await?;
        Ok(filter_multi_results(page.results))
    }
}

/// Search the table store by title/name substring.
pub struct StoreSearch {
    store: Arc<dyn CatalogStore>,
}

impl StoreSearch {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SearchBackend for StoreSearch {
    fn name(&self) -> &str {
        "store"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let found = self.store.search_content(query).await?;

        let movies = found.movies.into_iter().map(|m| SearchResult {
            id: m.id,
            media_type: MediaType::Movie,
            title: m.title,
            overview: m.overview,
            poster_path: m.poster_path,
            backdrop_path: m.backdrop_path,
            date: m.release_date,
            vote_average: m.vote_average,
        });
        let shows = found.tv_shows.into_iter().map(|t| SearchResult {
            id: t.id,
            media_type: MediaType::Tv,
            title: t.name,
            overview: t.overview,
            poster_path: t.poster_path,
            backdrop_path: t.backdrop_path,
            date: t.first_air_date,
            vote_average: t.vote_average,
        });

        Ok(movies.chain(shows).collect())
    }
}

/// Build the configured backend.
pub fn backend_from_config(
    config: &Config,
    store: Arc<dyn CatalogStore>,
) -> Result<Arc<dyn SearchBackend>> {
    match config.search.backend {
        SearchBackendKind::Tmdb => {
            let tmdb = TmdbClient::new(TmdbConfig::from_app_config(&config.tmdb)?);
            Ok(Arc::new(TmdbSearch::new(tmdb)))
        }
        SearchBackendKind::Store => Ok(Arc::new(StoreSearch::new(store))),
    }
}

/// What the overlay shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Text as typed.
    pub query: String,
    /// Query the current results answer.
    pub results_for: Option<String>,
    pub results: Vec<SearchResult>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Debounced search with stale-response protection.
pub struct SearchSession {
    backend: Arc<dyn SearchBackend>,
    debounce: Duration,
    generation: Arc<AtomicU64>,
    state: Arc<watch::Sender<SearchState>>,
    tasks: JoinSet<()>,
}

impl SearchSession {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self::with_debounce(backend, SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(backend: Arc<dyn SearchBackend>, debounce: Duration) -> Self {
        let (tx, _rx) = watch::channel(SearchState::default());
        Self {
            backend,
            debounce,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(tx),
            tasks: JoinSet::new(),
        }
    }

    /// Watch the overlay state.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Snapshot of the overlay state.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Name of the backend answering queries.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Handle a change of the query text.
    pub fn input(&mut self, query: &str) {
        // Reap finished tasks so the set does not grow while typing.
        while self.tasks.try_join_next().is_some() {}

        let seq = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let trimmed = query.trim().to_string();

        if trimmed.is_empty() {
            self.tasks.abort_all();
            self.state.send_replace(SearchState {
                query: query.to_string(),
                ..SearchState::default()
            });
            return;
        }

        self.state.send_modify(|s| s.query = query.to_string());

        let backend = Arc::clone(&self.backend);
        let generation = Arc::clone(&self.generation);
        let state = Arc::clone(&self.state);
        let debounce = self.debounce;

        self.tasks.spawn(async move {
            tokio::time::sleep(debounce).await;

            let started = state.send_if_modified(|s| {
                if generation.load(Ordering::SeqCst) != seq {
                    return false;
                }
                s.loading = true;
                true
            });
            if !started {
                return;
            }

            tracing::debug!("Searching {} for '{}'", backend.name(), trimmed);
            let outcome = backend.search(&trimmed).await;

            // The check runs under the channel's write lock, so a newer
            // keystroke either lands before it or after the write.
            let applied = state.send_if_modified(|s| {
                if generation.load(Ordering::SeqCst) != seq {
                    return false;
                }
                match outcome {
                    Ok(results) => {
                        s.results = results;
                        s.error = None;
                    }
                    Err(ref e) => {
                        tracing::error!("Error searching: {}", e);
                        s.results.clear();
                        s.error = Some(e.to_string());
                    }
                }
                s.results_for = Some(trimmed.clone());
                s.loading = false;
                true
            });
            if !applied {
                tracing::debug!("Discarding stale results for '{}'", trimmed);
            }
        });
    }

    /// Close the overlay: cancel everything and clear the state.
    pub fn close(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.tasks.abort_all();
        self.state.send_replace(SearchState::default());
    }

    /// Wait until no query is pending or in flight.
    pub async fn settle(&mut self) {
        while self.tasks.join_next().await.is_some() {}
    }
}
