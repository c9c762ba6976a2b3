//! InkInSpot: tattoo image search
//!
//! A single `/search` endpoint resolves a text query to tattoo image collections in two
//! dependent steps, a vector store lookup followed by an image store lookup, all within one
//! request-wide time budget.

pub mod budget;
pub mod config;
pub mod query;
pub mod search;
pub mod stores;
pub mod web;

pub use budget::{Budget, BudgetGuard, Expired};
pub use config::Settings;
pub use search::{ImageCollection, ImageVector, LabelSet, SearchEngine, SearchError, TimeoutPolicy};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
