/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! HTTP host surface
//!
//! Exposes the connector operations to a host runtime over HTTP.
//! Routes are organized into submodules by functionality.

mod object_types;
mod search;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Router;

use crate::config::Config;
use crate::data_connector::DataConnector;

/// Shared application state
///
/// This state is available to all route handlers via Axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,

    /// The connector answering every request
    pub connector: Arc<DataConnector>,
}

/// Build the API router with all routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Search and test connection
        .merge(search::routes())
        // Registered object types
        .nest("/object-types", object_types::routes())
}

/// Health check endpoint
///
/// Liveness of this process only; backend reachability is `/test-connection`.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "service": "data-connector",
        "version": env!("CARGO_PKG_VERSION"),
        "url": state.config.server_url()
    }))
}
