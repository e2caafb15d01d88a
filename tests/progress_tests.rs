//! Integration tests for continue-watching math.

use stream_catalog::core::progress::{
    continue_watching_row, progress_percent, remaining_label, ContinueWatchingCard,
    MAX_CONTINUE_WATCHING_VISIBLE,
};
use stream_catalog::core::routes::Route;
use stream_catalog::models::media::MediaType;
use stream_catalog::models::progress::WatchProgress;

fn record(id: &str, media_type: MediaType, watched: f64, full: f64) -> WatchProgress {
    WatchProgress {
        id: id.to_string(),
        media_type,
        title: format!("Title {}", id),
        poster_path: Some("/poster.jpg".to_string()),
        backdrop_path: None,
        season: Some(2),
        episode: Some(3),
        watched_duration: watched,
        full_duration: full,
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

// ========== PERCENT TESTS ==========

#[test]
fn test_percent_in_range() {
    for (watched, full) in [(0.0, 10.0), (5.0, 10.0), (10.0, 10.0), (25.0, 10.0), (1.0, 3.0)] {
        let pct = progress_percent(watched, full);
        assert!(pct <= 100, "{} / {} gave {}", watched, full, pct);
    }
    assert_eq!(progress_percent(1800.0, 5400.0), 33);
}

#[test]
fn test_percent_shows_sliver_for_tiny_progress() {
    assert_eq!(progress_percent(1.0, 10_000.0), 1);
    assert_eq!(progress_percent(0.0, 10_000.0), 0);
}

#[test]
fn test_percent_zero_without_duration() {
    assert_eq!(progress_percent(30.0, 0.0), 0);
}

// ========== REMAINING LABEL TESTS ==========

#[test]
fn test_remaining_label_minutes() {
    assert_eq!(remaining_label(1800.0, 5400.0), "60m left");
    assert_eq!(remaining_label(5000.0, 5400.0), "7m left");
}

#[test]
fn test_remaining_label_hours_and_minutes() {
    assert_eq!(remaining_label(0.0, 5400.0), "1h 30m left");
}

#[test]
fn test_remaining_label_without_duration() {
    assert_eq!(remaining_label(100.0, 0.0), "0 left");
}

// ========== CARD TESTS ==========

#[test]
fn test_tv_card_subtitle_and_route() {
    let card = ContinueWatchingCard::from(&record("77", MediaType::Tv, 5000.0, 5400.0));
    assert_eq!(card.subtitle, "S2 • E3 • 7m left");
    assert_eq!(card.route, Route::Tv("77".to_string()));
    assert_eq!(card.percent, 93);
    assert_eq!(
        card.image.as_deref(),
        Some("https://image.tmdb.org/t/p/w500/poster.jpg")
    );
}

#[test]
fn test_movie_card_ignores_episode() {
    let card = ContinueWatchingCard::from(&record("5", MediaType::Movie, 1800.0, 5400.0));
    assert_eq!(card.subtitle, "Movie • 60m left");
    assert_eq!((card.season, card.episode), (1, 1));
}

#[test]
fn test_row_caps_visible_cards() {
    let records: Vec<_> = (0..10)
        .map(|i| record(&i.to_string(), MediaType::Movie, 10.0, 100.0))
        .collect();
    let row = continue_watching_row(&records);
    assert_eq!(row.cards.len(), MAX_CONTINUE_WATCHING_VISIBLE);
    assert!(row.show_more);

    let row = continue_watching_row(&records[..3]);
    assert_eq!(row.cards.len(), 3);
    assert!(!row.show_more);
}
