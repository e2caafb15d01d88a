//! Search command implementation.
//!
//! Runs the query through the same debounced session the overlay uses.

use super::browse::truncate;
use crate::cli::context::AppContext;
use crate::core::search::{self, SearchResult, SearchSession};
use crate::models::config::SearchBackendKind;
use crate::models::media::MediaType;
use crate::Result;
use colored::Colorize;

/// Execute search command.
pub async fn execute_search(
    ctx: &AppContext,
    query: &str,
    backend: Option<SearchBackendKind>,
) -> Result<()> {
    let mut config = ctx.config.clone();
    if let Some(kind) = backend {
        config.search.backend = kind;
    }

    let backend = search::backend_from_config(&config, ctx.store.clone())?;
    let mut session = SearchSession::with_debounce(
        backend,
        std::time::Duration::from_millis(config.search.debounce_ms),
    );

    session.input(query);
    session.settle().await;
    let state = session.state();

    if let Some(error) = state.error {
        println!("{} {}", "Search failed:".red(), error);
        return Ok(());
    }

    print_results(&state.results, session.backend_name());
    Ok(())
}

fn print_results(results: &[SearchResult], backend: &str) {
    if results.is_empty() {
        println!("{}", "No results found.".yellow());
        return;
    }

    println!(
        "{}",
        format!("Found {} results ({}):", results.len(), backend)
            .bold()
            .cyan()
    );
    println!();
    println!(
        " {:>4} | {:<5} | {:>4} | {:<40} | {}",
        "#", "Type", "Year", "Title", "Route"
    );
    println!("{}", "-".repeat(80));

    for (i, result) in results.iter().enumerate() {
        let kind = match result.media_type {
            MediaType::Movie => "Movie",
            MediaType::Tv => "TV",
        };
        println!(
            " {:>4} | {:<5} | {:>4} | {:<40} | {}",
            i + 1,
            kind,
            result.year().unwrap_or(""),
            truncate(&result.title, 38),
            result.route()
        );
    }
}
