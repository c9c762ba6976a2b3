//! Search execution and orchestration

use super::error::{SearchError, Stage};
use super::models::{ImageCollection, TimeoutPolicy};
use crate::budget::Budget;
use crate::query::normalize;
use crate::stores::{ImageStore, VectorStore};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Search engine that resolves a query to tattoo image collections.
///
/// The vector store is asked for matching IDs first, then the image store for the
/// collections behind those IDs. Each call runs under its own sub-budget of the caller's
/// budget. The engine holds no mutable state and can serve any number of concurrent searches.
pub struct SearchEngine {
    /// Per-dependency timeouts
    policy: TimeoutPolicy,
    /// Embedded tattoo characteristics
    vectors: Arc<dyn VectorStore>,
    /// Tattoo photos
    images: Arc<dyn ImageStore>,
}

impl SearchEngine {
    /// Create a new search engine
    pub fn new(
        policy: TimeoutPolicy,
        vectors: Arc<dyn VectorStore>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            policy,
            vectors,
            images,
        }
    }

    /// Return the image collections matching `raw_query`, best match first.
    ///
    /// Store errors are returned as the store produced them. Collections come back in the
    /// order the image store returned them; collections whose ID the vector store did not
    /// produce are dropped.
    pub async fn search(
        &self,
        budget: &Budget,
        raw_query: &str,
    ) -> Result<Vec<ImageCollection>, SearchError> {
        let query = normalize(raw_query);
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let ids = {
            let (stage_budget, _release) = budget.derive(self.policy.vector_store);
            let call = self.vectors.ids_by_query(&stage_budget, &query);
            run_stage(Stage::VectorStore, &stage_budget, call).await?
        };

        let collections = {
            let (stage_budget, _release) = budget.derive(self.policy.image_store);
            let call = self.images.collections_by_ids(&stage_budget, &ids);
            run_stage(Stage::ImageStore, &stage_budget, call).await?
        };

        Ok(retain_requested(&ids, collections))
    }
}

/// Run one store call under its budget, timing it
async fn run_stage<T, F>(stage: Stage, budget: &Budget, call: F) -> Result<T, SearchError>
where
    F: Future<Output = Result<T, SearchError>>,
{
    let start = Instant::now();
    debug!("Calling {} with budget {:?}", stage, budget.remaining());

    let result = match budget.run(call).await {
        Ok(result) => result,
        Err(expired) => Err(SearchError::expired(stage, expired)),
    };

    debug!(
        "{} finished in {:?} (ok: {})",
        stage,
        start.elapsed(),
        result.is_ok()
    );
    result
}

/// Drop collections the vector store never asked for, keeping the image store's order
fn retain_requested(ids: &[String], collections: Vec<ImageCollection>) -> Vec<ImageCollection> {
    let requested: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let returned = collections.len();

    let kept: Vec<ImageCollection> = collections
        .into_iter()
        .filter(|collection| requested.contains(collection.id.as_str()))
        .collect();

    if kept.len() < returned {
        warn!(
            "Image store returned {} collections that were not requested",
            returned - kept.len()
        );
    }
    kept
}
