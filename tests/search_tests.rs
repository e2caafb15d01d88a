//! Integration tests for the debounced search session.
//!
//! Time is paused, so sleeps advance the clock instantly and in order.

mod common;

use async_trait::async_trait;
use common::{movie, show, FakeStore};
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stream_catalog::core::search::{
    SearchBackend, SearchResult, SearchSession, StoreSearch, SEARCH_DEBOUNCE,
};
use stream_catalog::models::media::MediaType;
use stream_catalog::{Error, Result};

/// Backend that records queries and answers after a per-query delay.
#[derive(Default)]
struct RecordingBackend {
    calls: Mutex<Vec<String>>,
    delays: HashMap<String, Duration>,
    fail: bool,
}

impl RecordingBackend {
    fn with_delays(delays: &[(&str, u64)]) -> Self {
        Self {
            delays: delays
                .iter()
                .map(|(q, ms)| (q.to_string(), Duration::from_millis(*ms)))
                .collect(),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.calls.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail {
            return Err(Error::other("backend down"));
        }
        Ok(vec![SearchResult {
            id: query.to_string(),
            media_type: MediaType::Movie,
            title: format!("Result for {}", query),
            overview: None,
            poster_path: None,
            backdrop_path: None,
            date: None,
            vote_average: None,
        }])
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn test_fast_typing_issues_one_query() {
    let backend = Arc::new(RecordingBackend::default());
    let mut session = SearchSession::new(backend.clone());

    session.input("b");
    tokio::time::sleep(ms(100)).await;
    session.input("br");
    tokio::time::sleep(ms(100)).await;
    session.input("bre");

    // 299ms after the last keystroke nothing has been sent yet.
    tokio::time::sleep(ms(299)).await;
    assert!(backend.calls().is_empty());

    tokio::time::sleep(ms(2)).await;
    session.settle().await;
    assert_eq!(backend.calls(), vec!["bre".to_string()]);

    let state = session.state();
    assert_eq!(state.results_for.as_deref(), Some("bre"));
    assert_eq!(state.results.len(), 1);
    assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn test_clearing_cancels_pending_query() {
    let backend = Arc::new(RecordingBackend::default());
    let mut session = SearchSession::new(backend.clone());

    session.input("dune");
    tokio::time::sleep(SEARCH_DEBOUNCE).await;
    session.settle().await;
    assert_eq!(session.state().results.len(), 1);

    session.input("dunes");
    tokio::time::sleep(ms(100)).await;
    session.input("   ");
    tokio::time::sleep(ms(500)).await;
    session.settle().await;

    assert_eq!(backend.calls(), vec!["dune".to_string()]);
    let state = session.state();
    assert!(state.results.is_empty());
    assert!(state.results_for.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_does_not_overwrite_newer_results() {
    // "a" is slow and resolves after "ab" has already been applied.
    let backend = Arc::new(RecordingBackend::with_delays(&[("a", 500), ("ab", 10)]));
    let mut session = SearchSession::new(backend.clone());

    session.input("a");
    tokio::time::sleep(ms(350)).await;
    assert_eq!(backend.calls(), vec!["a".to_string()]);

    session.input("ab");
    tokio::time::sleep(ms(400)).await;
    assert_eq!(session.state().results_for.as_deref(), Some("ab"));

    session.settle().await;
    let state = session.state();
    assert_eq!(backend.calls(), vec!["a".to_string(), "ab".to_string()]);
    assert_eq!(state.results_for.as_deref(), Some("ab"));
    assert_eq!(state.results[0].id, "ab");
}

#[tokio::test(start_paused = true)]
async fn test_backend_error_clears_results() {
    let backend = Arc::new(RecordingBackend {
        fail: true,
        ..Default::default()
    });
    let mut session = SearchSession::new(backend);

    session.input("x");
    session.settle().await;

    let state = session.state();
    assert!(state.results.is_empty());
    assert!(state.error.is_some());
    assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_results() {
    let backend = Arc::new(RecordingBackend::default());
    let mut session = SearchSession::new(backend);
    let mut rx = session.subscribe();

    session.input("heat");
    loop {
        rx.changed().await.unwrap();
        if rx.borrow().results_for.is_some() {
            break;
        }
    }
    assert_eq!(rx.borrow().results[0].id, "heat");
}

#[tokio::test]
async fn test_store_backend_lists_movies_then_shows() {
    let store = Arc::new(FakeStore {
        movies: vec![movie("m1", 1, 7.0, &[])],
        shows: vec![show("s1", 1, 7.0, &[])],
        ..Default::default()
    });
    let backend = StoreSearch::new(store.clone());
    let results = backend.search("1").await.unwrap();

    assert_eq!(store.search_calls.load(Ordering::SeqCst), 1);
    let kinds: Vec<_> = results.iter().map(|r| (r.id.as_str(), r.media_type)).collect();
    assert_eq!(kinds, vec![("m1", MediaType::Movie), ("s1", MediaType::Tv)]);
    assert_eq!(results[1].route().to_string(), "/tv/s1");
}
