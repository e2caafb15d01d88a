//! Routing surface.
//!
//! Season and episode selection travel only in the query string of the
//! episode watch route, never as path segments.

use crate::models::media::MediaType;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A navigable location in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Watchlist,
    Movie(String),
    Tv(String),
    WatchMovie(String),
    WatchTv {
        id: String,
        season: Option<u32>,
        episode: Option<u32>,
    },
}

impl Route {
    /// Details page for a title.
    pub fn details(media_type: MediaType, id: &str) -> Self {
        match media_type {
            MediaType::Movie => Route::Movie(id.to_string()),
            MediaType::Tv => Route::Tv(id.to_string()),
        }
    }

    /// Watch page for a specific episode.
    pub fn watch_episode(id: &str, season: u32, episode: u32) -> Self {
        Route::WatchTv {
            id: id.to_string(),
            season: Some(season),
            episode: Some(episode),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Watchlist => write!(f, "/watchlist"),
            Route::Movie(id) => write!(f, "/movie/{}", encode(id)),
            Route::Tv(id) => write!(f, "/tv/{}", encode(id)),
            Route::WatchMovie(id) => write!(f, "/watch/movie/{}", encode(id)),
            Route::WatchTv {
                id,
                season,
                episode,
            } => {
                write!(f, "/watch/tv/{}", encode(id))?;
                let mut sep = '?';
                if let Some(season) = season {
                    write!(f, "{}season={}", sep, season)?;
                    sep = '&';
                }
                if let Some(episode) = episode {
                    write!(f, "{}episode={}", sep, episode)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (path, query) = match s.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (s, None),
        };
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|seg| !seg.is_empty())
            .collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["watchlist"] => Route::Watchlist,
            ["movie", id] => Route::Movie(decode(id)),
            ["tv", id] => Route::Tv(decode(id)),
            ["watch", "movie", id] => Route::WatchMovie(decode(id)),
            ["watch", "tv", id] => {
                let mut season = None;
                let mut episode = None;
                for (key, value) in query.into_iter().flat_map(parse_query) {
                    // Unparsable numbers fall back to the default episode.
                    match key.as_str() {
                        "season" => season = value.parse().ok(),
                        "episode" => episode = value.parse().ok(),
                        _ => {}
                    }
                }
                Route::WatchTv {
                    id: decode(id),
                    season,
                    episode,
                }
            }
            _ => return Err(Error::InvalidRoute(s.to_string())),
        };
        Ok(route)
    }
}

fn encode(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

fn parse_query(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query.split('&').filter(|p| !p.is_empty()).map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (decode(k), decode(v))
    })
}
