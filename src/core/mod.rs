//! Core catalog logic.

pub mod catalog;
pub mod episodes;
pub mod player;
pub mod progress;
pub mod routes;
pub mod search;
pub mod timers;
pub mod watchlist;
