//! Clients for the external services.

pub mod store;
pub mod tmdb;
