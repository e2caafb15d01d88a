//! Stream Catalog Library
//!
//! Catalog client for a movie/TV streaming service: table-store queries,
//! TMDB artwork and search, episode navigation, continue-watching and a
//! client-local watchlist.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
