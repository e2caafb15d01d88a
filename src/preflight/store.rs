//! Table store preflight check.

use super::CheckResult;
use crate::models::config::StoreConfig;
use crate::services::store::StoreClient;

const NAME: &str = "Table store";

/// Check that the store answers with the configured key.
pub async fn check(config: &StoreConfig) -> CheckResult {
    let client = match StoreClient::from_config(config) {
        Ok(client) => client,
        Err(e) => return CheckResult::failed(NAME, true, "not configured", e.to_string()),
    };

    match client.ping().await {
        Ok(true) => CheckResult::ok(NAME, "connected"),
        Ok(false) => CheckResult::failed(
            NAME,
            true,
            "request rejected",
            "Check your SUPABASE_ANON_KEY environment variable",
        ),
        Err(e) => CheckResult::failed(
            NAME,
            true,
            format!("connection failed: {}", e),
            "Check SUPABASE_URL and your network connection",
        ),
    }
}
