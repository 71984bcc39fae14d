/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Data Connector Library
//!
//! Adapts directory-search requests (base DN, filter, pagination attributes)
//! onto the collections of a REST backend, and folds backend health checks
//! into a single connection verdict.

pub mod config;
pub mod connectors;
pub mod data_connector;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

// Re-export commonly used types for convenience
pub use config::{Config, ConnectorSettings, ObjectTypeSpec, UnknownObjectPolicy};
pub use connectors::{BackendResourceHandler, ObjectTypeRegistry, RestResource};
pub use data_connector::DataConnector;
pub use error::{ConnectorError, ConnectorResult};
pub use models::{ConnectionCheckResult, SearchRequest, SearchResult, TestConnectionRequest};

/// Build the application router around an existing connector
pub fn router(config: Arc<Config>, connector: Arc<DataConnector>) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(routes::AppState { config, connector })
}

/// Build the connector described by `config` and the router serving it
///
/// Returns the router and the port to listen on.
pub fn build_app(config: Config) -> ConnectorResult<(Router, u16)> {
    let connector = DataConnector::from_properties(
        config.connection_properties(),
        &config.object_types,
        config.settings.clone(),
    )?;
    let port = config.port;

    Ok((router(Arc::new(config), Arc::new(connector)), port))
}
