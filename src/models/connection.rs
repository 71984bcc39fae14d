/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Connection test models

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use super::search::ResultStatus;

/// Test connection request from the host runtime
///
/// Carries no addressing: every registered backend is checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestConnectionRequest {}

/// Outcome of one backend health check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendHealth {
    pub object_type: String,
    pub healthy: bool,

    /// Failure reason, only set when unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BackendHealth {
    pub fn healthy(object_type: impl Into<String>) -> Self {
        BackendHealth {
            object_type: object_type.into(),
            healthy: true,
            message: None,
        }
    }

    pub fn failed(object_type: impl Into<String>, message: impl Into<String>) -> Self {
        BackendHealth {
            object_type: object_type.into(),
            healthy: false,
            message: Some(message.into()),
        }
    }
}

/// Aggregated verdict over every backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionCheckResult {
    pub status: ResultStatus,
    pub message: String,

    /// Per-backend outcomes in registration order
    pub backends: Vec<BackendHealth>,
}

impl ConnectionCheckResult {
    /// Fold per-backend outcomes into one verdict
    ///
    /// OK only if every backend is healthy. The error message lists every
    /// failed backend as `"<type>: <reason>"`, joined by `"; "`. With no
    /// backend at all nothing was reached, which is an error.
    pub fn aggregate(backends: Vec<BackendHealth>) -> Self {
        if backends.is_empty() {
            return ConnectionCheckResult {
                status: ResultStatus::Error,
                message: "no object types registered".to_string(),
                backends,
            };
        }

        let failures: Vec<String> = backends
            .iter()
            .filter(|b| !b.healthy)
            .map(|b| {
                format!(
                    "{}: {}",
                    b.object_type,
                    b.message.as_deref().unwrap_or("unhealthy")
                )
            })
            .collect();

        if failures.is_empty() {
            ConnectionCheckResult {
                status: ResultStatus::Ok,
                message: "All endpoints reachable".to_string(),
                backends,
            }
        } else {
            ConnectionCheckResult {
                status: ResultStatus::Error,
                message: failures.join("; "),
                backends,
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResultStatus::Ok
    }

    /// HTTP status the host surface answers with
    pub fn status_code(&self) -> StatusCode {
        if self.is_ok() {
            StatusCode::OK
        } else {
            StatusCode::BAD_GATEWAY
        }
    }
}
