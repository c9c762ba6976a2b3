//! Search orchestration module
//!
//! Resolves a query to image collections through the vector store and then the image store,
//! each under its own slice of the caller's time budget.

mod error;
mod executor;
mod models;

pub use error::*;
pub use executor::SearchEngine;
pub use models::*;
