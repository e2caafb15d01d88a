//! Continue-watching math and row projection.

use crate::core::routes::Route;
use crate::models::media::MediaType;
use crate::models::progress::WatchProgress;
use crate::services::tmdb::{image_url, ImageSize};

/// Cards shown in the continue-watching row before "view more".
pub const MAX_CONTINUE_WATCHING_VISIBLE: usize = 8;

/// Percentage watched, rounded and clamped to `[0, 100]`.
///
/// Any real progress reports at least 1 so the bar shows a sliver.
pub fn progress_percent(watched: f64, full: f64) -> u8 {
    if !(full > 0.0) || !watched.is_finite() {
        return 0;
    }
    let raw = (watched / full * 100.0).round().clamp(0.0, 100.0) as u8;
    if raw == 0 && watched > 0.0 {
        1
    } else {
        raw
    }
}

/// Remaining time as `"Xm left"`, or `"Xh Ym left"` past an hour.
pub fn remaining_label(watched: f64, full: f64) -> String {
    if !(full > 0.0) {
        return "0 left".to_string();
    }
    let remaining = (full - watched.max(0.0)).max(0.0);
    let minutes = (remaining / 60.0).round() as u64;
    if minutes > 60 {
        format!("{}h {}m left", minutes / 60, minutes % 60)
    } else {
        format!("{}m left", minutes)
    }
}

/// One card in the continue-watching row.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinueWatchingCard {
    pub id: String,
    pub media_type: MediaType,
    pub title: String,
    pub season: u32,
    pub episode: u32,
    pub route: Route,
    pub percent: u8,
    pub subtitle: String,
    pub image: Option<String>,
}

impl From<&WatchProgress> for ContinueWatchingCard {
    fn from(progress: &WatchProgress) -> Self {
        let (season, episode) = match progress.media_type {
            MediaType::Movie => (1, 1),
            MediaType::Tv => (
                progress.season.unwrap_or(1).max(1),
                progress.episode.unwrap_or(1).max(1),
            ),
        };

        let remaining = remaining_label(progress.watched_duration, progress.full_duration);
        let subtitle = match progress.media_type {
            MediaType::Movie => format!("Movie • {}", remaining),
            MediaType::Tv => format!("S{} • E{} • {}", season, episode, remaining),
        };

        let image = progress
            .backdrop_path
            .as_deref()
            .and_then(|p| image_url(p, ImageSize::W500))
            .or_else(|| {
                progress
                    .poster_path
                    .as_deref()
                    .and_then(|p| image_url(p, ImageSize::W500))
            });

        let title = if progress.title.trim().is_empty() {
            "Untitled".to_string()
        } else {
            progress.title.clone()
        };

        Self {
            id: progress.id.clone(),
            media_type: progress.media_type,
            title,
            season,
            episode,
            route: Route::details(progress.media_type, &progress.id),
            percent: progress_percent(progress.watched_duration, progress.full_duration),
            subtitle,
            image,
        }
    }
}

/// The continue-watching row: visible cards plus whether more exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContinueWatchingRow {
    pub cards: Vec<ContinueWatchingCard>,
    pub show_more: bool,
}

/// Project progress records (newest first) into the row.
pub fn continue_watching_row(records: &[WatchProgress]) -> ContinueWatchingRow {
    ContinueWatchingRow {
        cards: records
            .iter()
            .take(MAX_CONTINUE_WATCHING_VISIBLE)
            .map(ContinueWatchingCard::from)
            .collect(),
        show_more: records.len() > MAX_CONTINUE_WATCHING_VISIBLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_handles_bad_input() {
        assert_eq!(progress_percent(10.0, 0.0), 0);
        assert_eq!(progress_percent(10.0, f64::NAN), 0);
        assert_eq!(progress_percent(-50.0, 100.0), 0);
        assert_eq!(progress_percent(500.0, 100.0), 100);
    }

    #[test]
    fn test_remaining_label_hours() {
        assert_eq!(remaining_label(0.0, 7200.0), "2h 0m left");
        assert_eq!(remaining_label(0.0, 3700.0), "1h 2m left");
        assert_eq!(remaining_label(6000.0, 5400.0), "0m left");
    }
}
