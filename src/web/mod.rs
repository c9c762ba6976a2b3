//! Web server module
//!
//! Provides the HTTP API for InkInSpot.

mod handlers;
mod routes;
mod state;

pub use handlers::{status_for, SearchResponse};
pub use routes::create_router;
pub use state::AppState;
