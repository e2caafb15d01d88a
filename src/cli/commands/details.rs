//! Movie and TV show detail pages.

use super::browse::{spinner, truncate};
use crate::cli::context::AppContext;
use crate::core::catalog;
use crate::core::episodes;
use crate::core::routes::Route;
use crate::models::media::{Genre, MediaType};
use crate::services::tmdb::{image_url, ImageSize};
use crate::Result;
use colored::Colorize;

/// Show a movie page.
pub async fn show_movie(ctx: &AppContext, id: &str) -> Result<()> {
    let pb = spinner("Loading movie...");
    let page = catalog::load_movie_page(ctx.store.as_ref(), id).await;
    pb.finish_and_clear();
    let page = page?;
    let movie = &page.movie;

    println!(
        "{} {}",
        movie.title.bold().cyan(),
        movie
            .year()
            .map(|y| format!("({})", y))
            .unwrap_or_default()
    );
    print_facts(
        movie.vote_average,
        movie.runtime.map(|r| format!("{} min", r)),
        &movie.genres,
    );
    if let Some(part) = movie.part_number {
        println!("  Part {}", part);
    }
    if let Some(ref overview) = movie.overview {
        println!();
        println!("  {}", overview);
    }
    if let Some(url) = movie.poster_path.as_deref().and_then(|p| image_url(p, ImageSize::W342)) {
        println!("  Poster: {}", url.dimmed());
    }
    println!(
        "  Watchlist: {}",
        if ctx.watchlist.contains(&movie.id, MediaType::Movie) {
            "saved".green()
        } else {
            "not saved".normal()
        }
    );
    println!("  Play: {}", Route::WatchMovie(movie.id.clone()));
    println!();

    if !page.related.is_empty() {
        println!("{}", format!("More like this ({}):", page.related.len()).bold());
        for related in page.related.iter().take(10) {
            println!(
                "  {:<40} {}",
                truncate(&related.title, 38),
                Route::Movie(related.id.clone()).to_string().dimmed()
            );
        }
    }

    Ok(())
}

/// Show a TV show page with its seasons and episodes.
pub async fn show_tv(ctx: &AppContext, id: &str, season: Option<u32>) -> Result<()> {
    let pb = spinner("Loading show...");
    let page = catalog::load_show_page(ctx.store.as_ref(), id).await;
    pb.finish_and_clear();
    let page = page?;
    let show = &page.show;

    println!(
        "{} {}",
        show.name.bold().cyan(),
        show.year().map(|y| format!("({})", y)).unwrap_or_default()
    );
    print_facts(
        show.vote_average,
        show.number_of_seasons.map(|n| format!("{} seasons", n)),
        &show.genres,
    );
    if let Some(ref overview) = show.overview {
        println!();
        println!("  {}", overview);
    }
    println!();

    if page.episodes.is_empty() {
        println!("{}", "No episodes available.".yellow());
    }

    for s in &page.seasons {
        if season.is_some_and(|wanted| wanted != s.season_number) {
            continue;
        }
        let season_episodes = episodes::episodes_in_season(&page.episodes, s.season_number);
        println!(
            "{}",
            format!("Season {} ({} episodes):", s.season_number, season_episodes.len()).bold()
        );
        for ep in season_episodes {
            println!(
                "  {} {:<40} {}",
                ep.code(),
                truncate(ep.name.as_deref().unwrap_or("Untitled"), 38),
                Route::watch_episode(&show.id, ep.season_number, ep.episode_number)
                    .to_string()
                    .dimmed()
            );
        }
        println!();
    }

    if !page.related.is_empty() {
        println!("{}", format!("More like this ({}):", page.related.len()).bold());
        for related in page.related.iter().take(10) {
            println!(
                "  {:<40} {}",
                truncate(&related.name, 38),
                Route::Tv(related.id.clone()).to_string().dimmed()
            );
        }
    }

    Ok(())
}

fn print_facts(vote: Option<f32>, length: Option<String>, genres: &[Genre]) {
    let mut facts = Vec::new();
    if let Some(v) = vote.filter(|v| *v > 0.0) {
        facts.push(format!("★ {:.1}", v));
    }
    facts.extend(length);
    if !genres.is_empty() {
        facts.push(
            genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        );
    }
    if !facts.is_empty() {
        println!("  {}", facts.join(" • "));
    }
}
