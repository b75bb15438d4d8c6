//! Request resolution: parameters in, response out.
//!
//! [`QueryResolver`] is the single entry point shared by the HTTP router
//! and the gateway-event path. It holds no per-request state, so one
//! instance serves any number of concurrent requests.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use airq_store::RangeStore;

use crate::config::DisplayConfig;
use crate::error::QueryError;
use crate::intent::{self, OutputFormat};
use crate::planner;
use crate::render;
use crate::response::HandlerResponse;

/// Interprets, plans, queries and renders one request at a time.
#[derive(Clone)]
pub struct QueryResolver {
    store: Arc<dyn RangeStore>,
    display: DisplayConfig,
}

impl QueryResolver {
    /// Create a resolver over a store.
    pub fn new(store: Arc<dyn RangeStore>, display: DisplayConfig) -> Self {
        Self { store, display }
    }

    /// Presentation settings in effect.
    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Resolve one request. Never fails: every error becomes a `400`.
    pub async fn resolve(&self, path: &str, params: &HashMap<String, String>) -> HandlerResponse {
        match self.try_resolve(path, params).await {
            Ok(response) => response,
            Err(e) => {
                match &e {
                    QueryError::InvalidArgument(reason) => {
                        warn!(path, "Rejected request: {}", reason);
                    }
                    QueryError::NotFound { .. } => warn!(path, "{}", e),
                    QueryError::Store(_) => error!(path, "{}", e),
                }
                e.into_response(self.display.locale)
            }
        }
    }

    async fn try_resolve(
        &self,
        path: &str,
        params: &HashMap<String, String>,
    ) -> Result<HandlerResponse, QueryError> {
        let intent = intent::interpret(params, OutputFormat::from_path(path))?;
        let plan = planner::build_plan(&intent);
        debug!("Query plan: {}", plan);

        let observations = self.store.range_query(&plan).await?;
        let scanned = observations.len();
        debug!("Store returned {} observations", scanned);

        let response = render::render(observations, &intent, &self.display)?;
        info!(
            path,
            results = scanned.min(intent.limit as usize),
            "Query served"
        );
        Ok(response)
    }
}
