//! Command line argument definitions.

use crate::models::config::SearchBackendKind;
use crate::models::media::MediaType;
use clap::{Parser, Subcommand};

/// Stream Catalog - Browse and watch the catalog from the terminal
#[derive(Parser, Debug)]
#[command(name = "stream-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the home page rows
    Browse,

    /// Show movie details and related titles
    Movie {
        /// Movie id
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Show TV show details, seasons and episodes
    Show {
        /// TV show id
        #[arg(value_name = "ID")]
        id: String,

        /// Only list episodes of this season
        #[arg(short, long)]
        season: Option<u32>,
    },

    /// Open a title for playback
    Watch {
        #[command(subcommand)]
        target: WatchTarget,
    },

    /// Open a catalog path such as /watch/tv/12?season=2&episode=3
    Open {
        /// Route path
        #[arg(value_name = "ROUTE")]
        route: String,
    },

    /// Quick search for movies and TV shows
    Search {
        /// Search text
        #[arg(value_name = "QUERY")]
        query: String,

        /// Override the configured search backend: tmdb or store
        #[arg(long)]
        backend: Option<SearchBackendKind>,
    },

    /// Manage the watchlist
    Watchlist {
        #[command(subcommand)]
        action: WatchlistAction,
    },

    /// Show the continue-watching row
    Continue,
}

#[derive(Subcommand, Debug)]
pub enum WatchTarget {
    /// Play a movie
    Movie {
        #[arg(value_name = "ID")]
        id: String,

        #[command(flatten)]
        progress: ProgressArgs,
    },

    /// Play a TV episode
    Tv {
        #[arg(value_name = "ID")]
        id: String,

        /// Season number (default 1)
        #[arg(short, long)]
        season: Option<u32>,

        /// Episode number (default 1)
        #[arg(short, long)]
        episode: Option<u32>,

        #[command(flatten)]
        progress: ProgressArgs,
    },
}

/// Playback position to remember for continue-watching.
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct ProgressArgs {
    /// Seconds watched
    #[arg(long, requires = "duration")]
    pub watched: Option<f64>,

    /// Total length in seconds
    #[arg(long, requires = "watched")]
    pub duration: Option<f64>,
}

impl ProgressArgs {
    pub fn none() -> Self {
        Self {
            watched: None,
            duration: None,
        }
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.watched.zip(self.duration)
    }
}

#[derive(Subcommand, Debug)]
pub enum WatchlistAction {
    /// List saved titles
    List,

    /// Add a title
    Add {
        /// movie or tv
        #[arg(value_name = "TYPE")]
        media_type: MediaType,

        #[arg(value_name = "ID")]
        id: String,
    },

    /// Remove a title
    Remove {
        /// movie or tv
        #[arg(value_name = "TYPE")]
        media_type: MediaType,

        #[arg(value_name = "ID")]
        id: String,
    },
}
