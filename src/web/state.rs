//! Application state shared across handlers

use crate::config::Settings;
use crate::search::SearchEngine;
use crate::stores::{ImageStore, VectorStore};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Settings the service was started with
    pub settings: Arc<Settings>,
    /// Search engine
    pub engine: Arc<SearchEngine>,
}

impl AppState {
    /// Create new application state, wiring the stores into a search engine
    pub fn new(
        settings: Settings,
        vectors: Arc<dyn VectorStore>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        let engine = SearchEngine::new(settings.search.timeout_policy(), vectors, images);
        Self {
            settings: Arc::new(settings),
            engine: Arc::new(engine),
        }
    }

    /// Overall budget for one search request
    pub fn request_timeout(&self) -> Duration {
        self.settings.search.request_timeout()
    }
}
