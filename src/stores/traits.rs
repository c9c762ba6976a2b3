//! Store contracts consumed by the search engine

use crate::budget::Budget;
use crate::search::{ImageCollection, SearchError};
use async_trait::async_trait;

/// Service holding the embedded characteristics of tattoo images.
///
/// Implementations must stop work and return once `budget` fires.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// IDs matching a canonical query, best match first
    async fn ids_by_query(&self, budget: &Budget, query: &str) -> Result<Vec<String>, SearchError>;
}

/// Service holding tattoo image collections.
///
/// Implementations must stop work and return once `budget` fires, and should return
/// collections in the order of `ids`.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn collections_by_ids(
        &self,
        budget: &Budget,
        ids: &[String],
    ) -> Result<Vec<ImageCollection>, SearchError>;
}
