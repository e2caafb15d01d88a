//! Preflight checks module.
//!
//! The table store is always required. TMDB is required only when it backs
//! the search overlay; otherwise a failing TMDB check is a warning, since
//! artwork URLs still point at its image CDN.

mod store;
mod tmdb;

use crate::models::config::{Config, SearchBackendKind};
use crate::Result;
use colored::Colorize;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

/// Result of a preflight check.
#[derive(Debug)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

impl CheckResult {
    pub fn ok(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Ok,
            message: message.into(),
            hint: None,
        }
    }

    /// A failed check; `required` decides whether it blocks startup.
    pub fn failed(
        name: &'static str,
        required: bool,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            name,
            status: if required {
                CheckStatus::Fail
            } else {
                CheckStatus::Warn
            },
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

/// Run all preflight checks.
pub async fn run_preflight_checks(config: &Config) -> Result<Vec<CheckResult>> {
    let tmdb_required = config.search.backend == SearchBackendKind::Tmdb;
    let (store, tmdb) = futures::future::join(
        store::check(&config.store),
        tmdb::check(&config.tmdb, tmdb_required),
    )
    .await;
    Ok(vec![store, tmdb])
}

/// Print preflight check results.
pub fn print_results(results: &[CheckResult]) {
    for result in results {
        let tag = match result.status {
            CheckStatus::Ok => "[OK]".green(),
            CheckStatus::Warn => "[WARN]".yellow(),
            CheckStatus::Fail => "[FAIL]".red(),
        };
        println!("{} {}: {}", tag, result.name.bold(), result.message);
        if let Some(ref hint) = result.hint {
            println!("  {} {}", "->".yellow(), hint);
        }
    }
}

/// True when no required check failed.
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.status != CheckStatus::Fail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_failures_do_not_block() {
        let results = vec![
            CheckResult::ok("Table store", "connected"),
            CheckResult::failed("TMDB API", false, "invalid API key", "Check TMDB_API_KEY"),
        ];
        assert_eq!(results[1].status, CheckStatus::Warn);
        assert!(all_passed(&results));
    }

    #[test]
    fn test_required_failure_blocks() {
        let results = vec![CheckResult::failed(
            "Table store",
            true,
            "not configured",
            "Set SUPABASE_URL",
        )];
        assert!(!all_passed(&results));
    }
}
