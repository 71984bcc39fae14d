/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Object type routes
//!
//! Routes:
//! - GET /api/object-types - List registered object types in routing order
//! - GET /api/object-types/:token - One object type

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::connectors::ObjectTypeInfo;
use crate::error::{ConnectorError, ConnectorResult};
use crate::routes::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_object_types))
        .route("/:token", get(get_object_type))
}

async fn list_object_types(State(state): State<AppState>) -> Json<Vec<ObjectTypeInfo>> {
    Json(
        state
            .connector
            .registry()
            .entries()
            .iter()
            .map(|entry| entry.describe())
            .collect(),
    )
}

/// Returns 404 if the token is not registered.
async fn get_object_type(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ConnectorResult<Json<ObjectTypeInfo>> {
    state
        .connector
        .registry()
        .get(&token)
        .map(|entry| Json(entry.describe()))
        .ok_or_else(|| ConnectorError::NotFound(format!("Object type not found: {}", token)))
}
