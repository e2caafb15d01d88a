//! Integration tests for view timers and the spotlight banner.
//!
//! All tests run on paused time, so sleeps advance the clock instantly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use stream_catalog::core::timers::{Spotlight, ViewTimers, HERO_IDLE_TIMEOUT, TRAILER_PREVIEW_DELAY};
use tokio::time::sleep;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn counting_timer(timers: &mut ViewTimers, name: &'static str, delay: Duration) -> Arc<AtomicUsize> {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    timers.start(name, delay, async move {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    fired
}

// ========== VIEW TIMER TESTS ==========

#[tokio::test(start_paused = true)]
async fn test_timer_fires_after_delay() {
    let mut timers = ViewTimers::new();
    let fired = counting_timer(&mut timers, "t", ms(500));
    assert!(timers.is_pending("t"));

    sleep(ms(499)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    sleep(ms(2)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(!timers.is_pending("t"));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_and_replace() {
    let mut timers = ViewTimers::new();
    let first = counting_timer(&mut timers, "t", ms(100));
    let second = counting_timer(&mut timers, "t", ms(200));

    sleep(ms(300)).await;
    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);

    let third = counting_timer(&mut timers, "t", ms(100));
    assert!(timers.cancel("t"));
    assert!(!timers.cancel("t"));
    sleep(ms(200)).await;
    assert_eq!(third.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_pending_timers() {
    let mut timers = ViewTimers::new();
    let a = counting_timer(&mut timers, "a", ms(100));
    let b = counting_timer(&mut timers, "b", ms(200));
    drop(timers);

    sleep(ms(1000)).await;
    assert_eq!(a.load(Ordering::SeqCst), 0);
    assert_eq!(b.load(Ordering::SeqCst), 0);
}

// ========== SPOTLIGHT TESTS ==========

#[tokio::test(start_paused = true)]
async fn test_trailer_starts_after_delay() {
    let spotlight = Spotlight::mount(true);
    assert!(!spotlight.state().trailer_playing);

    sleep(TRAILER_PREVIEW_DELAY - ms(1)).await;
    assert!(!spotlight.state().trailer_playing);

    sleep(ms(2)).await;
    assert!(spotlight.state().trailer_playing);
}

#[tokio::test(start_paused = true)]
async fn test_no_trailer_never_plays() {
    let spotlight = Spotlight::mount(false);
    assert!(!spotlight.has_trailer());
    sleep(ms(10_000)).await;
    assert!(!spotlight.state().trailer_playing);
}

#[tokio::test(start_paused = true)]
async fn test_stop_trailer_cancels_autoplay() {
    let mut spotlight = Spotlight::mount(true);
    sleep(ms(1000)).await;
    spotlight.stop_trailer();
    sleep(ms(5000)).await;
    assert!(!spotlight.state().trailer_playing);
}

#[tokio::test(start_paused = true)]
async fn test_details_hide_after_idle() {
    let spotlight = Spotlight::mount(false);

    sleep(HERO_IDLE_TIMEOUT - ms(1)).await;
    assert!(!spotlight.state().details_hidden);

    sleep(ms(2)).await;
    assert!(spotlight.state().details_hidden);
}

#[tokio::test(start_paused = true)]
async fn test_activity_restarts_idle_countdown() {
    let mut spotlight = Spotlight::mount(false);

    sleep(ms(3000)).await;
    spotlight.activity();

    // 4.5s after mount, 1.5s after the activity.
    sleep(ms(1500)).await;
    assert!(!spotlight.state().details_hidden);

    sleep(ms(2600)).await;
    assert!(spotlight.state().details_hidden);

    spotlight.activity();
    assert!(!spotlight.state().details_hidden);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_cancels_timers() {
    let spotlight = Spotlight::mount(true);
    sleep(ms(1000)).await;
    let state = spotlight.unmount();
    assert!(!state.trailer_playing);
    assert!(!state.details_hidden);
}
