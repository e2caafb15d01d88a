//! Managed embed player.
//!
//! The third-party player runs inside an iframe we do not control. The
//! [`ManagedPlayer`] owns the visible state around it, redirects the
//! embed's own fullscreen onto the surrounding container, and decides
//! which window messages count as end-of-playback.

use crate::models::config::PlayerConfig;
use crate::Result;

/// Lifecycle of the player shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Playing,
    Closed,
}

/// What the page should do once the player closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// Manual playback: hide the player and stay on the page.
    Hide,
    /// Auto-played deep link: go back to the previous page.
    NavigateBack,
}

/// Element that currently holds fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenTarget {
    /// The third-party iframe.
    Embed,
    /// Our own container with the overlay controls.
    Container,
}

/// Vendor families of the fullscreen API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenApi {
    Standard,
    Webkit,
    Moz,
    Ms,
}

impl FullscreenApi {
    /// Probe order used when detecting support.
    pub const ALL: [FullscreenApi; 4] = [
        FullscreenApi::Standard,
        FullscreenApi::Webkit,
        FullscreenApi::Moz,
        FullscreenApi::Ms,
    ];

    pub fn request_method(&self) -> &'static str {
        match self {
            FullscreenApi::Standard => "requestFullscreen",
            FullscreenApi::Webkit => "webkitRequestFullscreen",
            FullscreenApi::Moz => "mozRequestFullScreen",
            FullscreenApi::Ms => "msRequestFullscreen",
        }
    }

    pub fn exit_method(&self) -> &'static str {
        match self {
            FullscreenApi::Standard => "exitFullscreen",
            FullscreenApi::Webkit => "webkitExitFullscreen",
            FullscreenApi::Moz => "mozCancelFullScreen",
            FullscreenApi::Ms => "msExitFullscreen",
        }
    }

    pub fn element_property(&self) -> &'static str {
        match self {
            FullscreenApi::Standard => "fullscreenElement",
            FullscreenApi::Webkit => "webkitFullscreenElement",
            FullscreenApi::Moz => "mozFullScreenElement",
            FullscreenApi::Ms => "msFullscreenElement",
        }
    }

    pub fn change_event(&self) -> &'static str {
        match self {
            FullscreenApi::Standard => "fullscreenchange",
            FullscreenApi::Webkit => "webkitfullscreenchange",
            FullscreenApi::Moz => "mozfullscreenchange",
            FullscreenApi::Ms => "MSFullscreenChange",
        }
    }

    /// First family the host supports.
    pub fn detect(supports: impl Fn(FullscreenApi) -> bool) -> Option<FullscreenApi> {
        Self::ALL.into_iter().find(|api| supports(*api))
    }
}

/// The page hosting the player.
pub trait FullscreenHost {
    /// Fullscreen API family available on this host.
    fn api(&self) -> FullscreenApi;
    /// Which element is fullscreen right now, if any.
    fn fullscreen_element(&self) -> Option<FullscreenTarget>;
    fn exit_fullscreen(&mut self) -> Result<()>;
    fn request_fullscreen(&mut self, target: FullscreenTarget) -> Result<()>;
}

/// Signal decoded from an embed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    Ended,
}

/// Decode an embed message body.
///
/// JSON bodies are matched on their `event` field; anything that is not
/// JSON falls back to a substring check.
pub fn parse_embed_message(data: &str) -> Option<PlaybackEvent> {
    match serde_json::from_str::<serde_json::Value>(data) {
        Ok(value) => match value.get("event").and_then(|e| e.as_str()) {
            Some("ended") | Some("video-ended") => Some(PlaybackEvent::Ended),
            _ => None,
        },
        Err(_) => {
            if data.contains("ended") || data.contains("complete") {
                Some(PlaybackEvent::Ended)
            } else {
                None
            }
        }
    }
}

/// `scheme://host[:port]` of a URL, lowercased.
pub fn origin_of(url: &str) -> Option<String> {
    let origin = reqwest::Url::parse(url).ok()?.origin();
    if origin.is_tuple() {
        Some(origin.ascii_serialization())
    } else {
        None
    }
}

/// Player shell around a third-party embed.
pub struct ManagedPlayer<H: FullscreenHost> {
    embed_url: String,
    allowed_origins: Vec<String>,
    host: H,
    state: PlayerState,
    muted: bool,
    autoplay: bool,
    ended: bool,
}

impl<H: FullscreenHost> ManagedPlayer<H> {
    /// Create a player for an embed URL. With `autoplay` the player starts
    /// immediately and closing navigates back.
    pub fn new(embed_url: impl Into<String>, config: &PlayerConfig, host: H, autoplay: bool) -> Self {
        let embed_url = embed_url.into();
        let mut allowed_origins: Vec<String> = origin_of(&embed_url).into_iter().collect();
        allowed_origins.extend(config.allowed_origins.iter().filter_map(|o| origin_of(o)));
        allowed_origins.dedup();

        let mut player = Self {
            embed_url,
            allowed_origins,
            host,
            state: PlayerState::Idle,
            muted: false,
            autoplay,
            ended: false,
        };
        if autoplay {
            player.play();
        }
        player
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// URL to load in the iframe, or `None` while the player is hidden.
    pub fn iframe_src(&self) -> Option<&str> {
        match self.state {
            PlayerState::Playing => Some(&self.embed_url),
            _ => None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn play(&mut self) {
        if self.state != PlayerState::Playing {
            tracing::debug!("Playing {}", self.embed_url);
            self.state = PlayerState::Playing;
            self.ended = false;
        }
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Close the player and leave fullscreen if we hold it.
    pub fn close(&mut self) -> CloseAction {
        if self.host.fullscreen_element().is_some() {
            if let Err(e) = self.host.exit_fullscreen() {
                tracing::debug!("Failed to exit fullscreen: {}", e);
            }
        }
        self.state = PlayerState::Closed;
        if self.autoplay {
            CloseAction::NavigateBack
        } else {
            CloseAction::Hide
        }
    }

    /// Handle a fullscreen-change event from the host.
    ///
    /// Returns true when fullscreen was moved from the embed to the
    /// container. Failures leave the page out of fullscreen.
    pub fn on_fullscreen_change(&mut self) -> bool {
        if self.host.fullscreen_element() != Some(FullscreenTarget::Embed) {
            return false;
        }

        let api = self.host.api();
        if let Err(e) = self.host.exit_fullscreen() {
            tracing::debug!("{} failed: {}", api.exit_method(), e);
        }
        match self.host.request_fullscreen(FullscreenTarget::Container) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to enter fullscreen via {}: {}", api.request_method(), e);
                false
            }
        }
    }

    /// Request fullscreen on the container from our own button.
    pub fn enter_fullscreen(&mut self) -> bool {
        match self.host.request_fullscreen(FullscreenTarget::Container) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to enter fullscreen: {}", e);
                false
            }
        }
    }

    fn is_trusted_origin(&self, origin: &str) -> bool {
        origin_of(origin)
            .map(|o| self.allowed_origins.contains(&o))
            .unwrap_or(false)
    }

    /// Handle a window message. Only messages from the embed's origin or
    /// a configured origin are considered.
    pub fn on_message(&mut self, origin: &str, data: &str) -> Option<PlaybackEvent> {
        if !self.is_trusted_origin(origin) {
            tracing::debug!("Ignoring message from untrusted origin {}", origin);
            return None;
        }
        let event = parse_embed_message(data)?;
        if event == PlaybackEvent::Ended {
            self.ended = true;
        }
        Some(event)
    }
}
