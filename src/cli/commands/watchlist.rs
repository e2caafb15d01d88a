//! Watchlist command implementation.

use super::browse::truncate;
use crate::cli::args::WatchlistAction;
use crate::cli::context::AppContext;
use crate::core::routes::Route;
use crate::models::media::{MediaType, WatchlistItem};
use crate::{Error, Result};
use colored::Colorize;

/// Execute watchlist subcommand.
pub async fn execute_watchlist(ctx: &mut AppContext, action: WatchlistAction) -> Result<()> {
    match action {
        WatchlistAction::List => list(ctx),
        WatchlistAction::Add { media_type, id } => add(ctx, media_type, &id).await,
        WatchlistAction::Remove { media_type, id } => {
            if ctx.watchlist.remove(&id, media_type)? {
                println!("{} {} {}", "Removed".green(), media_type, id);
            } else {
                println!("{} {} is not in the watchlist", media_type, id);
            }
            Ok(())
        }
    }
}

/// List saved titles.
pub fn list(ctx: &AppContext) -> Result<()> {
    let items = ctx.watchlist.items();
    if items.is_empty() {
        println!("Your watchlist is empty.");
        return Ok(());
    }

    println!("{}", format!("Watchlist ({}):", items.len()).bold().cyan());
    for item in items {
        println!(
            "  {:<5} {:<40} {:>4}  {}",
            item.media_type,
            truncate(&item.title, 38),
            item.date.as_deref().and_then(|d| d.get(0..4)).unwrap_or(""),
            Route::details(item.media_type, &item.id).to_string().dimmed()
        );
    }
    Ok(())
}

async fn add(ctx: &mut AppContext, media_type: MediaType, id: &str) -> Result<()> {
    let item: WatchlistItem = match media_type {
        MediaType::Movie => ctx
            .store
            .get_movie_by_id(id)
            .await?
            .map(|m| WatchlistItem::from(&m)),
        MediaType::Tv => ctx
            .store
            .get_tv_show_by_id(id, false)
            .await?
            .map(|t| WatchlistItem::from(&t)),
    }
    .ok_or_else(|| Error::NotFound(format!("{} {}", media_type, id)))?;

    let title = item.title.clone();
    if ctx.watchlist.add(item)? {
        println!("{} {}", "Added".green(), title);
    } else {
        println!("{} is already in the watchlist", title);
    }
    Ok(())
}
