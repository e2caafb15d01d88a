//! Stream Catalog CLI
//!
//! Browse, search and watch the streaming catalog from the terminal.

use clap::Parser;
use stream_catalog::cli::{
    args::{Cli, Commands, WatchTarget},
    commands::{browse, details, search, watch, watchlist},
    context::AppContext,
};
use stream_catalog::core::watchlist::WatchHistory;
use stream_catalog::models::config::{self, Config};
use stream_catalog::preflight;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = config::load_config();

    // Continue-watching is local-only and needs no table store.
    if let Commands::Continue = cli.command {
        let history = WatchHistory::open(config.history_path())?;
        browse::continue_watching(&history)?;
        return Ok(());
    }

    if !cli.skip_preflight {
        run_preflight_checks(&config).await?;
    }

    let mut ctx = AppContext::new(config)?;

    // Run the appropriate command
    match cli.command {
        Commands::Browse => {
            browse::browse(&ctx).await?;
        }

        Commands::Movie { id } => {
            details::show_movie(&ctx, &id).await?;
        }

        Commands::Show { id, season } => {
            details::show_tv(&ctx, &id, season).await?;
        }

        Commands::Watch { target } => match target {
            WatchTarget::Movie { id, progress } => {
                watch::watch_movie(&mut ctx, &id, progress).await?;
            }
            WatchTarget::Tv {
                id,
                season,
                episode,
                progress,
            } => {
                watch::watch_tv(&mut ctx, &id, season, episode, progress).await?;
            }
        },

        Commands::Open { route } => {
            watch::open(&mut ctx, &route).await?;
        }

        Commands::Search { query, backend } => {
            search::execute_search(&ctx, &query, backend).await?;
        }

        Commands::Watchlist { action } => {
            watchlist::execute_watchlist(&mut ctx, action).await?;
        }

        // Handled before the context is built.
        Commands::Continue => {}
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("stream_catalog=debug")
    } else {
        EnvFilter::new("stream_catalog=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(config: &Config) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config).await?;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
