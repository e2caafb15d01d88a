//! View-scoped timers.
//!
//! A view starts its timers through [`ViewTimers`]; clearing or dropping
//! it cancels everything still pending, so nothing fires into a view that
//! is gone.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::AbortHandle;
use tokio::task::JoinSet;

/// Delay before a spotlight trailer starts playing.
pub const TRAILER_PREVIEW_DELAY: Duration = Duration::from_secs(3);
/// Inactivity before spotlight details are hidden.
pub const HERO_IDLE_TIMEOUT: Duration = Duration::from_secs(4);

/// Named one-shot timers owned by a view.
#[derive(Default)]
pub struct ViewTimers {
    tasks: JoinSet<()>,
    named: HashMap<&'static str, AbortHandle>,
}

impl ViewTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` after `delay`. Starting a timer under a name that is
    /// already pending replaces the old one.
    pub fn start<F>(&mut self, name: &'static str, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        while self.tasks.try_join_next().is_some() {}
        self.cancel(name);
        let handle = self.tasks.spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });
        self.named.insert(name, handle);
    }

    /// Cancel one timer. Returns false when it was not pending.
    pub fn cancel(&mut self, name: &str) -> bool {
        match self.named.remove(name) {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self, name: &str) -> bool {
        self.named.get(name).is_some_and(|h| !h.is_finished())
    }

    /// Cancel every pending timer.
    pub fn clear(&mut self) {
        self.tasks.abort_all();
        self.named.clear();
    }
}

impl Drop for ViewTimers {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Visible state of the spotlight banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpotlightState {
    pub trailer_playing: bool,
    pub details_hidden: bool,
}

/// Spotlight banner: starts the trailer after a delay and hides the
/// details once the viewer stops interacting.
pub struct Spotlight {
    state: Arc<Mutex<SpotlightState>>,
    timers: ViewTimers,
    has_trailer: bool,
}

const TRAILER_TIMER: &str = "trailer";
const IDLE_TIMER: &str = "idle";

impl Spotlight {
    /// Mount the banner and arm its timers.
    pub fn mount(has_trailer: bool) -> Self {
        let mut spotlight = Self {
            state: Arc::new(Mutex::new(SpotlightState::default())),
            timers: ViewTimers::new(),
            has_trailer,
        };

        if has_trailer {
            let state = Arc::clone(&spotlight.state);
            spotlight
                .timers
                .start(TRAILER_TIMER, TRAILER_PREVIEW_DELAY, async move {
                    if let Ok(mut s) = state.lock() {
                        s.trailer_playing = true;
                    }
                });
        }
        spotlight.arm_idle();
        spotlight
    }

    fn arm_idle(&mut self) {
        let state = Arc::clone(&self.state);
        self.timers.start(IDLE_TIMER, HERO_IDLE_TIMEOUT, async move {
            if let Ok(mut s) = state.lock() {
                s.details_hidden = true;
            }
        });
    }

    /// Viewer moved or clicked: show details again and restart the idle
    /// countdown.
    pub fn activity(&mut self) {
        if let Ok(mut s) = self.state.lock() {
            s.details_hidden = false;
        }
        self.arm_idle();
    }

    /// Stop the trailer and any pending autoplay.
    pub fn stop_trailer(&mut self) {
        self.timers.cancel(TRAILER_TIMER);
        if let Ok(mut s) = self.state.lock() {
            s.trailer_playing = false;
        }
    }

    pub fn has_trailer(&self) -> bool {
        self.has_trailer
    }

    pub fn state(&self) -> SpotlightState {
        self.state.lock().map(|s| *s).unwrap_or_default()
    }

    /// Unmount the banner, cancelling its timers.
    pub fn unmount(mut self) -> SpotlightState {
        self.timers.clear();
        self.state()
    }
}
