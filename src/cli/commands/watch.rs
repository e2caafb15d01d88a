//! Watch and open commands.
//!
//! The terminal cannot host the embed, so playback prints the embed URL
//! the player would load plus the navigation around it.

use super::browse::truncate;
use crate::cli::args::ProgressArgs;
use crate::cli::context::AppContext;
use crate::core::catalog::{self, WatchEpisode};
use crate::core::player::{FullscreenApi, FullscreenHost, FullscreenTarget, ManagedPlayer};
use crate::core::routes::Route;
use crate::models::media::{Episode, MediaType};
use crate::models::progress::WatchProgress;
use crate::{Error, Result};
use colored::Colorize;

/// Host without fullscreen support.
struct TerminalHost;

impl FullscreenHost for TerminalHost {
    fn api(&self) -> FullscreenApi {
        FullscreenApi::Standard
    }

    fn fullscreen_element(&self) -> Option<FullscreenTarget> {
        None
    }

    fn exit_fullscreen(&mut self) -> Result<()> {
        Ok(())
    }

    fn request_fullscreen(&mut self, _target: FullscreenTarget) -> Result<()> {
        Err(Error::Fullscreen("terminal has no fullscreen".to_string()))
    }
}

/// Play a movie.
pub async fn watch_movie(ctx: &mut AppContext, id: &str, progress: ProgressArgs) -> Result<()> {
    let movie = catalog::load_watch_movie(ctx.store.as_ref(), id).await?;

    let embed_url = movie
        .embed_url
        .clone()
        .ok_or_else(|| Error::NotFound(format!("embed for movie {}", id)))?;

    println!("{} {}", "▶".green(), movie.title.bold());
    play(ctx, &embed_url);

    if let Some((watched, full)) = progress.position() {
        ctx.history.record(WatchProgress {
            id: movie.id.clone(),
            media_type: MediaType::Movie,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            backdrop_path: movie.backdrop_path.clone(),
            season: None,
            episode: None,
            watched_duration: watched,
            full_duration: full,
            updated_at: String::new(),
        })?;
        println!("  Progress saved.");
    }

    Ok(())
}

/// Play a TV episode, following the redirect to the first episode when
/// the requested one does not exist.
pub async fn watch_tv(
    ctx: &mut AppContext,
    id: &str,
    season: Option<u32>,
    episode: Option<u32>,
    progress: ProgressArgs,
) -> Result<()> {
    let mut requested = (season, episode);
    let resolved = loop {
        match catalog::load_watch_episode(ctx.store.as_ref(), id, requested.0, requested.1).await? {
            WatchEpisode::Redirect { season, episode } => {
                let route = Route::watch_episode(id, season, episode);
                println!("{} {}", "Redirecting to".yellow(), route);
                // A redirect always targets an existing episode.
                if requested == (Some(season), Some(episode)) {
                    return Err(Error::NotFound(route.to_string()));
                }
                requested = (Some(season), Some(episode));
            }
            play => break play,
        }
    };

    let WatchEpisode::Play {
        show,
        episode,
        next,
        previous,
    } = resolved
    else {
        return Err(Error::NotFound(format!("tv show {}", id)));
    };

    println!(
        "{} {} {} {}",
        "▶".green(),
        show.name.bold(),
        episode.code().cyan(),
        episode.name.as_deref().unwrap_or("")
    );

    match episode.embed_url.as_deref().or(show.embed_url.as_deref()) {
        Some(embed_url) => play(ctx, embed_url),
        None => println!("{}", "  No embed available for this episode.".yellow()),
    }

    print_neighbour("Previous", &show.id, previous.as_ref());
    print_neighbour("Next", &show.id, next.as_ref());
    if next.is_none() {
        println!("  {}", "End of series.".dimmed());
    }

    if let Some((watched, full)) = progress.position() {
        ctx.history.record(WatchProgress {
            id: show.id.clone(),
            media_type: MediaType::Tv,
            title: show.name.clone(),
            poster_path: show.poster_path.clone(),
            backdrop_path: show.backdrop_path.clone(),
            season: Some(episode.season_number),
            episode: Some(episode.episode_number),
            watched_duration: watched,
            full_duration: full,
            updated_at: String::new(),
        })?;
        println!("  Progress saved.");
    }

    Ok(())
}

/// Open a route string.
pub async fn open(ctx: &mut AppContext, route: &str) -> Result<()> {
    match route.parse::<Route>()? {
        Route::Home => super::browse::browse(ctx).await,
        Route::Watchlist => super::watchlist::list(ctx),
        Route::Movie(id) => super::details::show_movie(ctx, &id).await,
        Route::Tv(id) => super::details::show_tv(ctx, &id, None).await,
        Route::WatchMovie(id) => watch_movie(ctx, &id, ProgressArgs::none()).await,
        Route::WatchTv {
            id,
            season,
            episode,
        } => watch_tv(ctx, &id, season, episode, ProgressArgs::none()).await,
    }
}

fn play(ctx: &AppContext, embed_url: &str) {
    let mut player = ManagedPlayer::new(embed_url, &ctx.config.player, TerminalHost, true);
    if let Some(src) = player.iframe_src() {
        println!("  Embed: {}", src);
    }
    player.close();
}

fn print_neighbour(label: &str, show_id: &str, episode: Option<&Episode>) {
    if let Some(ep) = episode {
        println!(
            "  {:<9} {} {:<30} {}",
            format!("{}:", label),
            ep.code(),
            truncate(ep.name.as_deref().unwrap_or("Untitled"), 28),
            Route::watch_episode(show_id, ep.season_number, ep.episode_number)
                .to_string()
                .dimmed()
        );
    }
}
