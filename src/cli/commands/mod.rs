//! CLI command implementations.

pub mod browse;
pub mod details;
pub mod search;
pub mod watch;
pub mod watchlist;
