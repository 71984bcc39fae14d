/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Connector operation routes
//!
//! Routes:
//! - POST /api/search - Search one object type, body is a SearchRequest
//! - POST /api/test-connection - Health check every backend
//!
//! Bodies are always result envelopes; the HTTP status mirrors the envelope.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use crate::models::{ConnectionCheckResult, SearchRequest, SearchResult, TestConnectionRequest};
use crate::routes::AppState;

/// Build connector operation routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search", post(search))
        .route("/test-connection", post(test_connection))
}

/// POST /api/search
async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> (StatusCode, Json<SearchResult>) {
    let result = state.connector.search(&request).await;
    (result.status_code(), Json(result))
}

/// POST /api/test-connection
///
/// The body is optional.
async fn test_connection(
    State(state): State<AppState>,
    request: Option<Json<TestConnectionRequest>>,
) -> (StatusCode, Json<ConnectionCheckResult>) {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let result = state.connector.test_connection(&request).await;
    (result.status_code(), Json(result))
}
