//! Stores module
//!
//! Defines the vector and image store contracts the search engine calls, plus in-memory
//! implementations seeded from a YAML file.

mod loader;
mod memory;
mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use loader::{SeedData, SeedTattoo, StoreLoader};
pub use memory::{MemoryImageStore, MemoryVectorStore};
pub use traits::*;
