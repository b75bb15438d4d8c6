//! Application state shared across handlers.

use std::sync::Arc;

use airq_store::{RangeStore, Store};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::resolver::QueryResolver;

/// Shared application state.
pub struct AppState {
    /// Resolves every query request.
    pub resolver: QueryResolver,
}

impl AppState {
    /// Create state over a SQLite store.
    ///
    /// The store sits behind an async mutex, so queries are served one at a
    /// time while the rest of request handling runs concurrently.
    pub fn new(store: Store, config: &Config) -> Arc<Self> {
        Self::with_store(Arc::new(Mutex::new(store)), config)
    }

    /// Create state over any range store.
    pub fn with_store(store: Arc<dyn RangeStore>, config: &Config) -> Arc<Self> {
        Arc::new(Self {
            resolver: QueryResolver::new(store, config.display.clone()),
        })
    }
}
