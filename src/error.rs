/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Error types for the data connector
//!
//! Handler and routing failures are expressed as [`ConnectorError`]. The public
//! connector operations fold these into result envelopes; only the host surface
//! turns them into HTTP responses directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors that can occur while dispatching to backend resources
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// A backend call failed: transport error, non-2xx status, timeout or bad payload
    #[error("{object_type} backend unavailable: {message}")]
    BackendUnavailable {
        object_type: String,
        message: String,
    },

    /// No registered object type matches the request (HTTP 400)
    #[error("Unsupported object type: {0}")]
    UnknownObjectType(String),

    /// Connection properties could not be turned into a working client
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Requested resource does not exist (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl ConnectorError {
    /// Build a [`ConnectorError::BackendUnavailable`] for an object type
    pub fn backend(object_type: impl Into<String>, message: impl Into<String>) -> Self {
        ConnectorError::BackendUnavailable {
            object_type: object_type.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConnectorError::BackendUnavailable { .. } => StatusCode::BAD_GATEWAY,
            ConnectorError::UnknownObjectType(_) => StatusCode::BAD_REQUEST,
            ConnectorError::InvalidConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ConnectorError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ConnectorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("Server error: {}", message);
        }

        let body = Json(json!({
            "error": true,
            "message": message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for connector operations
pub type ConnectorResult<T> = Result<T, ConnectorError>;
