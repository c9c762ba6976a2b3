//! Tattoo image data models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Rejected label weight
#[derive(Debug, Clone, PartialEq, Error)]
#[error("label '{tag}' has invalid weight {weight}: weights must be finite and non-negative")]
pub struct InvalidWeight {
    pub tag: String,
    pub weight: f64,
}

/// Descriptive tags with their proximity weight (typically 0-100).
///
/// Weights are always finite and non-negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, f64>", into = "HashMap<String, f64>")]
pub struct LabelSet(HashMap<String, f64>);

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a label set from tag/weight pairs, rejecting the first invalid weight
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, InvalidWeight>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut labels = Self::new();
        for (tag, weight) in pairs {
            labels.insert(tag, weight)?;
        }
        Ok(labels)
    }

    /// Insert or replace a tag's weight
    pub fn insert(&mut self, tag: impl Into<String>, weight: f64) -> Result<(), InvalidWeight> {
        let tag = tag.into();
        if !weight.is_finite() || weight < 0.0 {
            return Err(InvalidWeight { tag, weight });
        }
        self.0.insert(tag, weight);
        Ok(())
    }

    pub fn weight(&self, tag: &str) -> Option<f64> {
        self.0.get(tag).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(tag, weight)| (tag.as_str(), *weight))
    }
}

impl TryFrom<HashMap<String, f64>> for LabelSet {
    type Error = InvalidWeight;

    fn try_from(map: HashMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_pairs(map)
    }
}

impl From<LabelSet> for HashMap<String, f64> {
    fn from(labels: LabelSet) -> Self {
        labels.0
    }
}

/// Embedded characteristics of a tattoo image collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageVector {
    pub id: String,
    /// Styles (black & white, realistic, ...)
    #[serde(default)]
    pub style: LabelSet,
    /// Subjects (lion, sword, ...)
    #[serde(default)]
    pub subject: LabelSet,
    /// Anatomical areas (arm, chest, ...)
    #[serde(default)]
    pub area: LabelSet,
}

impl ImageVector {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            style: LabelSet::new(),
            subject: LabelSet::new(),
            area: LabelSet::new(),
        }
    }

    pub fn with_style(mut self, style: LabelSet) -> Self {
        self.style = style;
        self
    }

    pub fn with_subject(mut self, subject: LabelSet) -> Self {
        self.subject = subject;
        self
    }

    pub fn with_area(mut self, area: LabelSet) -> Self {
        self.area = area;
        self
    }

    /// All label sets of this vector
    pub fn label_sets(&self) -> [&LabelSet; 3] {
        [&self.style, &self.subject, &self.area]
    }
}

/// Photos of one tattoo, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCollection {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "URLs")]
    pub urls: Vec<String>,
}

impl ImageCollection {
    pub fn new<I, S>(id: impl Into<String>, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }
}

/// Per-dependency time ceilings, fixed for the lifetime of a search engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutPolicy {
    pub vector_store: Duration,
    pub image_store: Duration,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            vector_store: Duration::from_millis(200),
            image_store: Duration::from_millis(200),
        }
    }
}
