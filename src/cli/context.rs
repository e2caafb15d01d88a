//! Application root: configuration, service clients and local stores.

use crate::core::watchlist::{WatchHistory, WatchlistStore};
use crate::models::config::Config;
use crate::services::store::{CatalogStore, StoreClient};
use crate::Result;
use std::sync::Arc;

/// Everything a command needs, built once at startup.
pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn CatalogStore>,
    pub watchlist: WatchlistStore,
    pub history: WatchHistory,
}

impl AppContext {
    /// Build the context from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn CatalogStore> = Arc::new(StoreClient::from_config(&config.store)?);
        Self::with_store(config, store)
    }

    /// Build the context around an existing store.
    pub fn with_store(config: Config, store: Arc<dyn CatalogStore>) -> Result<Self> {
        let watchlist = WatchlistStore::open(config.watchlist_path())?;
        let history = WatchHistory::open(config.history_path())?;
        Ok(Self {
            config,
            store,
            watchlist,
            history,
        })
    }
}
