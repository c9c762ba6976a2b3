//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{any, get},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Method checks happen inside the handler so every method gets the JSON body
        .route("/search", any(handlers::search))
        .route("/health", get(handlers::health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
