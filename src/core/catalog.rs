//! Page loaders and derived lists.
//!
//! Loaders fetch rows from the table store, compute the small in-memory
//! lists the views show, and degrade to empty rows when a fetch fails.

use crate::core::episodes::{self, EpisodeResolution};
use crate::models::media::{CatalogItem, Episode, Genre, Movie, Season, TvShow};
use crate::services::store::CatalogStore;
use crate::{Error, Result};
use std::collections::HashSet;

/// Rows fetched per table for the home page.
pub const HOME_FETCH_LIMIT: usize = 50;
/// Rows fetched per table when picking related titles.
pub const RELATED_FETCH_LIMIT: usize = 100;
/// Length of trending/top-rated/related rows.
pub const ROW_LIMIT: usize = 20;
/// Length of the featured row.
pub const FEATURED_LIMIT: usize = 10;
/// Length of the top 10 row.
pub const TOP10_LIMIT: usize = 10;
/// Minimum vote average for the top-rated rows.
pub const TOP_RATED_THRESHOLD: f32 = 8.0;

/// Anything that can be ranked in a row.
pub trait Rankable {
    fn id(&self) -> &str;
    fn vote_count(&self) -> u32;
    fn vote_average(&self) -> f32;
    fn genres(&self) -> &[Genre];
}

impl Rankable for Movie {
    fn id(&self) -> &str {
        &self.id
    }
    fn vote_count(&self) -> u32 {
        self.vote_count.unwrap_or(0)
    }
    fn vote_average(&self) -> f32 {
        self.vote_average.unwrap_or(0.0)
    }
    fn genres(&self) -> &[Genre] {
        &self.genres
    }
}

impl Rankable for TvShow {
    fn id(&self) -> &str {
        &self.id
    }
    fn vote_count(&self) -> u32 {
        self.vote_count.unwrap_or(0)
    }
    fn vote_average(&self) -> f32 {
        self.vote_average.unwrap_or(0.0)
    }
    fn genres(&self) -> &[Genre] {
        &self.genres
    }
}

/// Most voted first.
pub fn trending<T: Rankable + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    // Stable sort keeps newest-first order among equal counts.
    sorted.sort_by(|a, b| b.vote_count().cmp(&a.vote_count()));
    sorted.truncate(ROW_LIMIT);
    sorted
}

/// Titles rated at or above the threshold, in source order.
pub fn top_rated<T: Rankable + Clone>(items: &[T]) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.vote_average() >= TOP_RATED_THRESHOLD)
        .take(ROW_LIMIT)
        .cloned()
        .collect()
}

/// Titles sharing at least one genre with `target`, excluding itself.
pub fn related<'a, T: Rankable>(target: &T, candidates: &'a [T]) -> Vec<&'a T> {
    let genre_ids: HashSet<u64> = target.genres().iter().map(|g| g.id).collect();
    candidates
        .iter()
        .filter(|c| c.id() != target.id())
        .filter(|c| c.genres().iter().any(|g| genre_ids.contains(&g.id)))
        .collect()
}

/// Drop second and later parts of multi-part movies.
pub fn standalone_or_first_part(movies: Vec<Movie>) -> Vec<Movie> {
    movies
        .into_iter()
        .filter(Movie::is_standalone_or_first_part)
        .collect()
}

/// Hero pick: first featured movie with a backdrop, else the first one.
pub fn spotlight(featured: &[Movie]) -> Option<&Movie> {
    featured
        .iter()
        .find(|m| m.backdrop_path.as_deref().is_some_and(|p| !p.is_empty()))
        .or_else(|| featured.first())
}

/// Home page rows.
#[derive(Debug, Clone, Default)]
pub struct HomeFeed {
    pub spotlight: Option<Movie>,
    pub featured_movies: Vec<Movie>,
    pub featured_tv_shows: Vec<TvShow>,
    pub trending_movies: Vec<Movie>,
    pub top_rated_movies: Vec<Movie>,
    pub popular_tv_shows: Vec<TvShow>,
    pub top_rated_tv_shows: Vec<TvShow>,
    pub top10: Vec<CatalogItem>,
}

impl HomeFeed {
    /// Derive every row from the fetched movies and shows.
    pub fn derive(movies: Vec<Movie>, tv_shows: Vec<TvShow>) -> Self {
        let movies = standalone_or_first_part(movies);
        let featured_movies: Vec<Movie> = movies.iter().take(FEATURED_LIMIT).cloned().collect();
        let featured_tv_shows: Vec<TvShow> =
            tv_shows.iter().take(FEATURED_LIMIT).cloned().collect();

        let trending_movies = trending(&movies);
        let top_rated_movies = top_rated(&movies);
        let popular_tv_shows = trending(&tv_shows);
        let top_rated_tv_shows = top_rated(&tv_shows);

        let top10 = top10(
            &trending_movies,
            &popular_tv_shows,
            &top_rated_movies,
            &top_rated_tv_shows,
        );

        Self {
            spotlight: spotlight(&featured_movies).cloned(),
            featured_movies,
            featured_tv_shows,
            trending_movies,
            top_rated_movies,
            popular_tv_shows,
            top_rated_tv_shows,
            top10,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.featured_movies.is_empty() && self.featured_tv_shows.is_empty()
    }
}

/// Merge the ranked rows, keep the first occurrence of each id, take 10.
pub fn top10(
    trending_movies: &[Movie],
    trending_tv: &[TvShow],
    top_movies: &[Movie],
    top_tv: &[TvShow],
) -> Vec<CatalogItem> {
    let merged = trending_movies
        .iter()
        .cloned()
        .map(CatalogItem::Movie)
        .chain(trending_tv.iter().cloned().map(CatalogItem::Tv))
        .chain(top_movies.iter().cloned().map(CatalogItem::Movie))
        .chain(top_tv.iter().cloned().map(CatalogItem::Tv));

    let mut seen = HashSet::new();
    merged
        .filter(|item| seen.insert(item.id().to_string()))
        .take(TOP10_LIMIT)
        .collect()
}

/// Fetch movies and shows together, then derive the home rows.
pub async fn load_home<S: CatalogStore + ?Sized>(store: &S) -> HomeFeed {
    let (movies, tv_shows) = futures::future::join(
        store.get_movies(HOME_FETCH_LIMIT, 0),
        store.get_tv_shows(HOME_FETCH_LIMIT, 0),
    )
    .await;

    let movies = movies.unwrap_or_else(|e| {
        tracing::error!("Error fetching movies: {}", e);
        Vec::new()
    });
    let tv_shows = tv_shows.unwrap_or_else(|e| {
        tracing::error!("Error fetching TV shows: {}", e);
        Vec::new()
    });

    tracing::debug!("Home feed: {} movies, {} shows", movies.len(), tv_shows.len());
    HomeFeed::derive(movies, tv_shows)
}

/// Movie details page.
#[derive(Debug, Clone)]
pub struct MoviePage {
    pub movie: Movie,
    pub related: Vec<Movie>,
    /// Suggested follow-up: the first related movie.
    pub next: Option<Movie>,
}

/// Load a movie with its related titles.
pub async fn load_movie_page<S: CatalogStore + ?Sized>(store: &S, id: &str) -> Result<MoviePage> {
    let (movie, all_movies) =
        futures::future::join(store.get_movie_by_id(id), store.get_movies(RELATED_FETCH_LIMIT, 0))
            .await;

    let movie = movie?.ok_or_else(|| Error::NotFound(format!("movie {}", id)))?;
    let all_movies = all_movies.unwrap_or_else(|e| {
        tracing::warn!("Error fetching related movies: {}", e);
        Vec::new()
    });

    let related: Vec<Movie> = related(&movie, &all_movies)
        .into_iter()
        .take(ROW_LIMIT)
        .cloned()
        .collect();
    let next = related.first().cloned();

    Ok(MoviePage {
        movie,
        related,
        next,
    })
}

/// TV show details page.
#[derive(Debug, Clone)]
pub struct ShowPage {
    pub show: TvShow,
    pub seasons: Vec<Season>,
    pub episodes: Vec<Episode>,
    pub related: Vec<TvShow>,
}

/// Load a show with its episodes. Episode failures are logged and the
/// show still renders without them. Seasons come from the seasons table,
/// or from the episode list when that table has no rows for the show.
pub async fn load_show_page<S: CatalogStore + ?Sized>(store: &S, id: &str) -> Result<ShowPage> {
    let (show, episodes, seasons, all_shows) = futures::future::join4(
        store.get_tv_show_by_id(id, false),
        store.get_episodes(id),
        store.get_seasons(id),
        store.get_tv_shows(RELATED_FETCH_LIMIT, 0),
    )
    .await;

    let show = show?.ok_or_else(|| Error::NotFound(format!("tv show {}", id)))?;

    let mut episodes = episodes.unwrap_or_else(|e| {
        tracing::error!("Error fetching episodes for {}: {}", id, e);
        Vec::new()
    });
    episodes::sort_episodes(&mut episodes);

    let all_shows = all_shows.unwrap_or_else(|e| {
        tracing::warn!("Error fetching related shows: {}", e);
        Vec::new()
    });
    let related = related(&show, &all_shows)
        .into_iter()
        .take(ROW_LIMIT)
        .cloned()
        .collect();

    let seasons = match seasons {
        Ok(stored) if !stored.is_empty() => stored,
        Ok(_) => episodes::seasons_from_episodes(&show.id, &episodes),
        Err(e) => {
            tracing::warn!("Error fetching seasons for {}: {}", id, e);
            episodes::seasons_from_episodes(&show.id, &episodes)
        }
    };

    Ok(ShowPage {
        seasons,
        show,
        episodes,
        related,
    })
}

/// Result of opening the episode watch route.
#[derive(Debug, Clone)]
pub enum WatchEpisode {
    Play {
        show: TvShow,
        episode: Episode,
        next: Option<Episode>,
        previous: Option<Episode>,
    },
    Redirect {
        season: u32,
        episode: u32,
    },
}

/// Load the active show and resolve the requested episode.
pub async fn load_watch_episode<S: CatalogStore + ?Sized>(
    store: &S,
    id: &str,
    season: Option<u32>,
    episode: Option<u32>,
) -> Result<WatchEpisode> {
    let (show, episodes) =
        futures::future::join(store.get_tv_show_by_id(id, true), store.get_episodes(id)).await;

    let show = show?.ok_or_else(|| Error::NotFound(format!("tv show {}", id)))?;
    let mut episodes = episodes?;
    episodes::sort_episodes(&mut episodes);

    match episodes::resolve_episode(&episodes, season, episode) {
        EpisodeResolution::Found {
            episode,
            next,
            previous,
        } => Ok(WatchEpisode::Play {
            episode: episode.clone(),
            next: next.cloned(),
            previous: previous.cloned(),
            show,
        }),
        EpisodeResolution::Redirect { season, episode } => {
            Ok(WatchEpisode::Redirect { season, episode })
        }
        EpisodeResolution::NotFound => {
            Err(Error::NotFound(format!("episodes for tv show {}", id)))
        }
    }
}

/// Load an active movie for playback.
pub async fn load_watch_movie<S: CatalogStore + ?Sized>(store: &S, id: &str) -> Result<Movie> {
    store
        .get_movie_by_id(id)
        .await?
        .filter(Movie::is_active)
        .ok_or_else(|| Error::NotFound(format!("movie {}", id)))
}
