//! Browse command implementation.
//!
//! Prints the home page rows and the continue-watching row.

use crate::cli::context::AppContext;
use crate::core::catalog::{self, Rankable};
use crate::core::progress::{continue_watching_row, ContinueWatchingRow};
use crate::core::routes::Route;
use crate::core::watchlist::WatchHistory;
use crate::models::media::MediaType;
use crate::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Show the home page.
pub async fn browse(ctx: &AppContext) -> Result<()> {
    let pb = spinner("Loading catalog...");
    let feed = catalog::load_home(ctx.store.as_ref()).await;
    pb.finish_and_clear();

    print_continue_watching(&continue_watching_row(ctx.history.continue_watching()));

    if feed.is_empty() {
        println!("{}", "Nothing to show yet.".yellow());
        return Ok(());
    }

    if let Some(ref hero) = feed.spotlight {
        println!("{}", "Spotlight".bold().cyan());
        println!(
            "  {} ({})  {}",
            hero.title.bold(),
            hero.year().map(|y| y.to_string()).unwrap_or_default(),
            Route::Movie(hero.id.clone()).to_string().dimmed()
        );
        if let Some(ref overview) = hero.overview {
            println!("  {}", truncate(overview, 100));
        }
        println!();
    }

    print_items(
        "Top 10 Today",
        feed.top10.iter().map(|item| {
            (
                item.media_type(),
                item.id(),
                item.title(),
                item.vote_average(),
            )
        }),
    );
    print_titles("Trending Movies", MediaType::Movie, &feed.trending_movies, |m| &m.title);
    print_titles("Top Rated Movies", MediaType::Movie, &feed.top_rated_movies, |m| &m.title);
    print_titles("Popular TV Shows", MediaType::Tv, &feed.popular_tv_shows, |t| &t.name);
    print_titles("Top Rated TV Shows", MediaType::Tv, &feed.top_rated_tv_shows, |t| &t.name);

    Ok(())
}

/// Show only the continue-watching row.
pub fn continue_watching(history: &WatchHistory) -> Result<()> {
    let row = continue_watching_row(history.continue_watching());
    if row.cards.is_empty() {
        println!("No titles in progress.");
    } else {
        print_continue_watching(&row);
    }
    Ok(())
}

fn print_continue_watching(row: &ContinueWatchingRow) {
    if row.cards.is_empty() {
        return;
    }

    println!("{}", "Continue Watching".bold().cyan());
    for card in &row.cards {
        println!(
            "  {:<40} {:>3}% {}  {}",
            truncate(&card.title, 38),
            card.percent,
            progress_bar(card.percent),
            card.subtitle.dimmed()
        );
    }
    if row.show_more {
        println!("  {}", format!("View more at {}", Route::Watchlist).dimmed());
    }
    println!();
}

fn print_titles<T: Rankable>(
    heading: &str,
    media_type: MediaType,
    items: &[T],
    title: impl Fn(&T) -> &str,
) {
    print_items(
        heading,
        items
            .iter()
            .map(|item| (media_type, item.id(), title(item), Some(item.vote_average()))),
    );
}

fn print_items<'a>(
    heading: &str,
    items: impl Iterator<Item = (MediaType, &'a str, &'a str, Option<f32>)>,
) {
    let rows: Vec<_> = items.collect();
    if rows.is_empty() {
        return;
    }

    println!("{}", format!("{} ({}):", heading, rows.len()).bold());
    println!(" {:>4} | {:<40} | {:>4} | {}", "#", "Title", "Vote", "Route");
    println!("{}", "-".repeat(80));
    for (i, (media_type, id, title, vote)) in rows.into_iter().enumerate() {
        println!(
            " {:>4} | {:<40} | {:>4} | {}",
            i + 1,
            truncate(title, 38),
            vote.map(|v| format!("{:.1}", v)).unwrap_or_default(),
            Route::details(media_type, id)
        );
    }
    println!();
}

/// Spinner shown while a page loads.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max.saturating_sub(3)).collect::<String>())
    } else {
        text.to_string()
    }
}

fn progress_bar(percent: u8) -> String {
    let filled = (percent as usize + 5) / 10;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled.min(10)))
}

