//! Search failures

use crate::budget::Expired;
use std::fmt;
use thiserror::Error;

/// Boxed cause carried by dependency failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Downstream dependency a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    VectorStore,
    ImageStore,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VectorStore => write!(f, "vector store"),
            Self::ImageStore => write!(f, "image store"),
        }
    }
}

/// Error raised by a search or by one of its stores
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search query is empty")]
    EmptyQuery,

    #[error("{0} exceeded its time budget")]
    StoreTimeout(Stage),

    #[error("{0} is empty")]
    StoreEmpty(Stage),

    #[error("{stage} is unavailable")]
    StoreUnavailable {
        stage: Stage,
        #[source]
        cause: Option<BoxError>,
    },

    #[error("{0} call was cancelled")]
    Cancelled(Stage),

    #[error("search failed")]
    Uncategorized(#[source] BoxError),
}

/// Identity of a [`SearchError`], used for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyQuery,
    StoreTimeout,
    StoreEmpty,
    StoreUnavailable,
    Cancelled,
    Uncategorized,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyQuery => ErrorKind::EmptyQuery,
            Self::StoreTimeout(_) => ErrorKind::StoreTimeout,
            Self::StoreEmpty(_) => ErrorKind::StoreEmpty,
            Self::StoreUnavailable { .. } => ErrorKind::StoreUnavailable,
            Self::Cancelled(_) => ErrorKind::Cancelled,
            Self::Uncategorized(_) => ErrorKind::Uncategorized,
        }
    }

    /// Dependency the failure came from, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::StoreTimeout(stage) | Self::StoreEmpty(stage) | Self::Cancelled(stage) => {
                Some(*stage)
            }
            Self::StoreUnavailable { stage, .. } => Some(*stage),
            Self::EmptyQuery | Self::Uncategorized(_) => None,
        }
    }

    pub fn unavailable(stage: Stage, cause: impl Into<BoxError>) -> Self {
        Self::StoreUnavailable {
            stage,
            cause: Some(cause.into()),
        }
    }

    pub fn other(cause: impl Into<BoxError>) -> Self {
        Self::Uncategorized(cause.into())
    }

    /// Failure for a call at `stage` whose budget fired
    pub fn expired(stage: Stage, expired: Expired) -> Self {
        match expired {
            Expired::DeadlineExceeded => Self::StoreTimeout(stage),
            Expired::Cancelled => Self::Cancelled(stage),
        }
    }
}
