//! TMDB API preflight check.

use super::CheckResult;
use crate::models::config::TmdbConfig as AppTmdbConfig;
use crate::services::tmdb::{TmdbClient, TmdbConfig};

const NAME: &str = "TMDB API";

/// Check if the TMDB API accepts the configured key.
pub async fn check(config: &AppTmdbConfig, required: bool) -> CheckResult {
    let tmdb_config = match TmdbConfig::from_app_config(config) {
        Ok(c) => c,
        Err(_) => {
            return CheckResult::failed(
                NAME,
                required,
                "API key not configured",
                "Set TMDB_API_KEY or use STREAM_CATALOG_SEARCH=store",
            )
        }
    };

    match TmdbClient::new(tmdb_config).verify_api_key().await {
        Ok(true) => CheckResult::ok(NAME, "connected"),
        Ok(false) => CheckResult::failed(
            NAME,
            required,
            "invalid API key",
            "Check your TMDB_API_KEY environment variable",
        ),
        Err(_) => CheckResult::failed(
            NAME,
            required,
            "connection failed",
            "Check your network connection",
        ),
    }
}
