//! In-memory stores
//!
//! Both stores are filled while being built and are read-only once shared with a
//! search engine.

use super::traits::{ImageStore, VectorStore};
use crate::budget::Budget;
use crate::query;
use crate::search::{ImageCollection, ImageVector, SearchError, Stage};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

/// Vector store matching query terms against label tags.
///
/// A vector matches when any of its style, subject or area tags equals a query term. Matches
/// are ordered by the summed weight of matching tags, highest first, ties broken by ID.
#[derive(Debug, Clone, Default)]
pub struct MemoryVectorStore {
    vectors: HashMap<String, ImageVector>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vector, replacing any vector with the same ID
    pub fn add_vector(&mut self, vector: ImageVector) {
        self.vectors.insert(vector.id.clone(), vector);
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    fn rank(&self, query: &str) -> Vec<String> {
        let terms: HashSet<&str> = query::terms(query).collect();

        let mut scored: Vec<(f64, &str)> = self
            .vectors
            .values()
            .filter_map(|vector| {
                let mut matched = false;
                let mut score = 0.0;
                for (tag, weight) in vector.label_sets().into_iter().flat_map(|l| l.iter()) {
                    if terms.contains(tag) {
                        matched = true;
                        score += weight;
                    }
                }
                matched.then_some((score, vector.id.as_str()))
            })
            .collect();

        scored.sort_by(|(a_score, a_id), (b_score, b_id)| {
            b_score.total_cmp(a_score).then_with(|| a_id.cmp(b_id))
        });
        scored.into_iter().map(|(_, id)| id.to_string()).collect()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn ids_by_query(&self, budget: &Budget, query: &str) -> Result<Vec<String>, SearchError> {
        if let Some(expired) = budget.expired() {
            return Err(SearchError::expired(Stage::VectorStore, expired));
        }
        if self.vectors.is_empty() {
            return Err(SearchError::StoreEmpty(Stage::VectorStore));
        }
        Ok(self.rank(query))
    }
}

/// Image store keyed by collection ID
#[derive(Debug, Clone, Default)]
pub struct MemoryImageStore {
    collections: HashMap<String, ImageCollection>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection, replacing any collection with the same ID
    pub fn add_collection(&mut self, collection: ImageCollection) {
        self.collections.insert(collection.id.clone(), collection);
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    /// Collections in the order of `ids`; unknown IDs are skipped
    async fn collections_by_ids(
        &self,
        budget: &Budget,
        ids: &[String],
    ) -> Result<Vec<ImageCollection>, SearchError> {
        if let Some(expired) = budget.expired() {
            return Err(SearchError::expired(Stage::ImageStore, expired));
        }
        if self.collections.is_empty() {
            return Err(SearchError::StoreEmpty(Stage::ImageStore));
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.collections.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{ErrorKind, LabelSet};
    use std::time::Duration;

    fn labels(pairs: &[(&str, f64)]) -> LabelSet {
        LabelSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    fn big_cats() -> MemoryVectorStore {
        let mut store = MemoryVectorStore::new();
        store.add_vector(
            ImageVector::new("X")
                .with_style(labels(&[("realistic", 100.0), ("bw", 100.0)]))
                .with_subject(labels(&[("lion", 100.0)]))
                .with_area(labels(&[("chest", 100.0)])),
        );
        store.add_vector(
            ImageVector::new("Y")
                .with_style(labels(&[("neotrad", 100.0), ("color", 100.0)]))
                .with_subject(labels(&[("lion", 100.0)]))
                .with_area(labels(&[("arm", 100.0)])),
        );
        store.add_vector(
            ImageVector::new("Z")
                .with_style(labels(&[("abstract", 100.0), ("bw", 100.0)]))
                .with_subject(labels(&[("tiger", 100.0)]))
                .with_area(labels(&[("chest", 100.0)])),
        );
        store
    }

    #[tokio::test]
    async fn test_vector_ranking() {
        let store = big_cats();
        let ids = store
            .ids_by_query(&Budget::unbounded(), "realistic black white lion chest")
            .await
            .unwrap();
        assert_eq!(ids, vec!["X", "Y", "Z"]);

        let ids = store.ids_by_query(&Budget::unbounded(), "tiger").await.unwrap();
        assert_eq!(ids, vec!["Z"]);

        let ids = store.ids_by_query(&Budget::unbounded(), "dragon").await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_vector_ties_break_by_id() {
        let store = big_cats();
        let ids = store.ids_by_query(&Budget::unbounded(), "bw").await.unwrap();
        assert_eq!(ids, vec!["X", "Z"]);
    }

    #[tokio::test]
    async fn test_empty_stores_report_empty() {
        let budget = Budget::unbounded();

        let err = MemoryVectorStore::new()
            .ids_by_query(&budget, "lion")
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::StoreEmpty(Stage::VectorStore)));

        let err = MemoryImageStore::new()
            .collections_by_ids(&budget, &["X".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::StoreEmpty(Stage::ImageStore)));
    }

    #[tokio::test]
    async fn test_image_store_follows_requested_order() {
        let mut store = MemoryImageStore::new();
        store.add_collection(ImageCollection::new("X", ["x1.jpg", "x2.jpg"]));
        store.add_collection(ImageCollection::new("Y", ["y.jpg"]));

        let ids = vec!["Y".to_string(), "missing".to_string(), "X".to_string()];
        let collections = store
            .collections_by_ids(&Budget::unbounded(), &ids)
            .await
            .unwrap();

        assert_eq!(
            collections,
            vec![
                ImageCollection::new("Y", ["y.jpg"]),
                ImageCollection::new("X", ["x1.jpg", "x2.jpg"]),
            ]
        );
    }

    #[tokio::test]
    async fn test_expired_budget_is_honored() {
        let (budget, _guard) = Budget::unbounded().derive(Duration::ZERO);

        let err = big_cats().ids_by_query(&budget, "lion").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreTimeout);

        let cancelled = Budget::unbounded();
        cancelled.cancel();
        let mut images = MemoryImageStore::new();
        images.add_collection(ImageCollection::new("X", ["x.jpg"]));
        let err = images
            .collections_by_ids(&cancelled, &["X".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }
}
