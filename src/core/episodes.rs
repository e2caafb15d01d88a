//! Episode resolution and season navigation.
//!
//! All lookups work on the flat episode list of one show, ordered by
//! `(season_number, episode_number)` ascending.

use crate::models::media::{Episode, Season};

/// Season/episode requested when the route carries none.
pub const DEFAULT_SEASON: u32 = 1;
pub const DEFAULT_EPISODE: u32 = 1;

/// Outcome of resolving a requested episode.
#[derive(Debug, Clone, PartialEq)]
pub enum EpisodeResolution<'a> {
    /// The requested episode exists.
    Found {
        episode: &'a Episode,
        next: Option<&'a Episode>,
        previous: Option<&'a Episode>,
    },
    /// The requested episode does not exist; go to this one instead.
    Redirect { season: u32, episode: u32 },
    /// The show has no episodes.
    NotFound,
}

/// Sort episodes by season, then episode number.
pub fn sort_episodes(episodes: &mut [Episode]) {
    episodes.sort_by_key(Episode::key);
}

/// Resolve a requested `(season, episode)` against a sorted episode list.
pub fn resolve_episode(
    episodes: &[Episode],
    season: Option<u32>,
    episode: Option<u32>,
) -> EpisodeResolution<'_> {
    let season = season.unwrap_or(DEFAULT_SEASON);
    let episode_number = episode.unwrap_or(DEFAULT_EPISODE);

    match find_episode(episodes, season, episode_number) {
        Some(found) => EpisodeResolution::Found {
            episode: found,
            next: next_episode(episodes, season, episode_number),
            previous: previous_episode(episodes, season, episode_number),
        },
        None => match episodes.first() {
            Some(first) => {
                tracing::debug!(
                    "S{}E{} not found, redirecting to {}",
                    season,
                    episode_number,
                    first.code()
                );
                EpisodeResolution::Redirect {
                    season: first.season_number,
                    episode: first.episode_number,
                }
            }
            None => EpisodeResolution::NotFound,
        },
    }
}

/// Find the episode with an exact `(season, episode)` match.
pub fn find_episode(episodes: &[Episode], season: u32, episode: u32) -> Option<&Episode> {
    episodes
        .iter()
        .find(|ep| ep.season_number == season && ep.episode_number == episode)
}

/// The episode after `(season, episode)`: the next number in the same
/// season, else the first episode of the following season.
pub fn next_episode(episodes: &[Episode], season: u32, episode: u32) -> Option<&Episode> {
    let same_season = episode
        .checked_add(1)
        .and_then(|next| find_episode(episodes, season, next));
    same_season.or_else(|| {
        season
            .checked_add(1)
            .and_then(|next| find_episode(episodes, next, 1))
    })
}

/// The episode before `(season, episode)`: the previous number in the same
/// season, else the last episode of the preceding season.
pub fn previous_episode(episodes: &[Episode], season: u32, episode: u32) -> Option<&Episode> {
    if episode > 1 {
        if let Some(prev) = find_episode(episodes, season, episode - 1) {
            return Some(prev);
        }
    }
    let prev_season = season.checked_sub(1)?;
    episodes
        .iter()
        .filter(|ep| ep.season_number == prev_season)
        .max_by_key(|ep| ep.episode_number)
}

/// Distinct seasons present in the episode list, ascending.
pub fn seasons_from_episodes(tv_show_id: &str, episodes: &[Episode]) -> Vec<Season> {
    let mut numbers: Vec<u32> = episodes.iter().map(|ep| ep.season_number).collect();
    numbers.sort_unstable();
    numbers.dedup();
    numbers
        .into_iter()
        .map(|season_number| Season {
            tv_show_id: tv_show_id.to_string(),
            season_number,
        })
        .collect()
}

/// Episodes of one season, in list order.
pub fn episodes_in_season(episodes: &[Episode], season: u32) -> Vec<&Episode> {
    episodes
        .iter()
        .filter(|ep| ep.season_number == season)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(season: u32, episode: u32) -> Episode {
        Episode {
            id: format!("{}-{}", season, episode),
            tv_show_id: "show".to_string(),
            season_number: season,
            episode_number: episode,
            ..Default::default()
        }
    }

    #[test]
    fn test_previous_crosses_season_boundary() {
        let episodes = vec![ep(1, 1), ep(1, 2), ep(1, 3), ep(2, 1)];
        assert_eq!(previous_episode(&episodes, 2, 1).map(Episode::key), Some((1, 3)));
        assert_eq!(previous_episode(&episodes, 1, 3).map(Episode::key), Some((1, 2)));
        assert_eq!(previous_episode(&episodes, 1, 1), None);
    }

    #[test]
    fn test_next_stops_at_numbering_limit() {
        let episodes = vec![ep(1, u32::MAX), ep(u32::MAX, 1)];
        assert_eq!(next_episode(&episodes, 1, u32::MAX), None);
        assert_eq!(next_episode(&episodes, u32::MAX, 1), None);
    }

    #[test]
    fn test_resolution_compares_by_value() {
        let episodes = vec![ep(1, 1), ep(1, 2)];
        assert_eq!(
            resolve_episode(&episodes, Some(1), Some(1)),
            EpisodeResolution::Found {
                episode: &episodes[0],
                next: Some(&episodes[1]),
                previous: None,
            }
        );
    }

    #[test]
    fn test_sort_episodes() {
        let mut episodes = vec![ep(2, 1), ep(1, 2), ep(1, 1)];
        sort_episodes(&mut episodes);
        let keys: Vec<_> = episodes.iter().map(Episode::key).collect();
        assert_eq!(keys, vec![(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_seasons_from_episodes() {
        let episodes = vec![ep(1, 1), ep(1, 2), ep(3, 1)];
        let seasons = seasons_from_episodes("show", &episodes);
        let numbers: Vec<_> = seasons.iter().map(|s| s.season_number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(episodes_in_season(&episodes, 1).len(), 2);
    }
}
