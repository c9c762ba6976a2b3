//! HTTP request handlers

use super::state::AppState;
use crate::budget::Budget;
use crate::query::normalize;
use crate::search::{ErrorKind, ImageCollection, SearchError};
use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Body of every /search response, whatever the status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub image_collections: Vec<ImageCollection>,
}

impl SearchResponse {
    fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// HTTP status for a failed search, decided by error kind only
pub fn status_for(err: &SearchError) -> StatusCode {
    match err.kind() {
        ErrorKind::EmptyQuery => StatusCode::BAD_REQUEST,
        ErrorKind::StoreTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::StoreEmpty | ErrorKind::StoreUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Search handler
pub async fn search(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET")],
            Json(SearchResponse::default()),
        )
            .into_response();
    }

    let span = info_span!("search", request_id = %Uuid::new_v4());
    run_search(state, uri).instrument(span).await
}

async fn run_search(state: AppState, uri: Uri) -> Response {
    let query = normalize(&query_param(&uri));

    let (budget, _release) = Budget::unbounded().derive(state.request_timeout());

    match state.engine.search(&budget, &query).await {
        Ok(image_collections) => {
            info!(
                "Search '{}' returned {} collections",
                query,
                image_collections.len()
            );
            SearchResponse { image_collections }.into_response_with(StatusCode::OK)
        }
        Err(err) => {
            let status = status_for(&err);
            if status.is_server_error() {
                error!(error = ?err, "Search '{}' failed: {}", query, err);
            } else {
                warn!("Search '{}' rejected: {}", query, err);
            }
            SearchResponse::default().into_response_with(status)
        }
    }
}

/// First `q` value of the query string; later repeats are ignored
fn query_param(uri: &Uri) -> String {
    match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(pairs)) => pairs
            .into_iter()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value)
            .unwrap_or_default(),
        Err(e) => {
            warn!("Unreadable query string: {}", e);
            String::new()
        }
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
