/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Response assembly
//!
//! Turns routing and handler outcomes into result envelopes. Nothing here
//! returns an error to the caller: every failure ends up inside the envelope.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::config::{ConnectorSettings, UnknownObjectPolicy};
use crate::connectors::{BackendResourceHandler, ObjectTypeRegistry};
use crate::error::{ConnectorError, ConnectorResult};
use crate::models::{
    BackendHealth, ConnectionCheckResult, Record, SearchParameters, SearchRequest, SearchResult,
};
use crate::services::router;

/// Builds search and connection check envelopes
#[derive(Debug, Clone, Default)]
pub struct ResponseAssembler {
    settings: ConnectorSettings,
}

impl ResponseAssembler {
    pub fn new(settings: ConnectorSettings) -> Self {
        ResponseAssembler { settings }
    }

    /// Route, fetch and wrap a search
    pub async fn search(&self, registry: &ObjectTypeRegistry, request: &SearchRequest) -> SearchResult {
        match self.try_search(registry, request).await {
            Ok(records) => {
                tracing::info!(count = records.len(), "Search completed");
                SearchResult::ok(records)
            }
            Err(e) => {
                match &e {
                    ConnectorError::UnknownObjectType(_) => tracing::warn!("Search rejected: {}", e),
                    _ => tracing::error!("Search failed: {}", e),
                }
                SearchResult::error(&e)
            }
        }
    }

    async fn try_search(
        &self,
        registry: &ObjectTypeRegistry,
        request: &SearchRequest,
    ) -> ConnectorResult<Vec<Record>> {
        let Some(route) = router::route(registry, request) else {
            tracing::warn!(
                scope = %request.object_scope,
                filter = %request.filter_expression,
                "Search request received for unknown object type"
            );
            return match self.settings.unknown_object_policy {
                UnknownObjectPolicy::Empty => Ok(Vec::new()),
                UnknownObjectPolicy::Reject => Err(ConnectorError::UnknownObjectType(
                    describe_scope(request),
                )),
            };
        };

        let handler = route.entry.handler();
        tracing::debug!(
            object_type = %route.entry.token(),
            source = ?route.source,
            "Routed search request"
        );

        let params = SearchParameters::from_map(&request.parameters, self.settings.default_page_size);
        self.bounded(handler.object_type(), handler.fetch(&params)).await
    }

    /// Health check every registered backend and aggregate the outcomes
    ///
    /// Every handler is called exactly once, concurrently; the results are
    /// joined in registration order.
    pub async fn test_connection(&self, registry: &ObjectTypeRegistry) -> ConnectionCheckResult {
        let checks = registry
            .entries()
            .iter()
            .map(|entry| self.check(entry.token(), entry.handler()));

        let result = ConnectionCheckResult::aggregate(join_all(checks).await);
        if result.is_ok() {
            tracing::info!(backends = result.backends.len(), "Connection test successful");
        } else {
            tracing::warn!("Connection test failed: {}", result.message);
        }
        result
    }

    async fn check(&self, object_type: &str, handler: &Arc<dyn BackendResourceHandler>) -> BackendHealth {
        match self.bounded(object_type, handler.health_check()).await {
            Ok(true) => BackendHealth::healthy(object_type),
            Ok(false) => BackendHealth::failed(object_type, "backend reported unhealthy"),
            Err(ConnectorError::BackendUnavailable { message, .. }) => {
                BackendHealth::failed(object_type, message)
            }
            Err(e) => BackendHealth::failed(object_type, e.to_string()),
        }
    }

    /// Run a backend call within the configured timeout
    async fn bounded<T>(
        &self,
        object_type: &str,
        call: impl Future<Output = ConnectorResult<T>>,
    ) -> ConnectorResult<T> {
        let timeout = self.settings.call_timeout;
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ConnectorError::backend(
                object_type,
                format!("timed out after {}", format_duration(timeout)),
            )),
        }
    }
}

fn describe_scope(request: &SearchRequest) -> String {
    match (request.object_scope.trim(), request.filter_expression.trim()) {
        ("", "") => "(empty request)".to_string(),
        (scope, "") => scope.to_string(),
        ("", filter) => filter.to_string(),
        (scope, filter) => format!("{} {}", scope, filter),
    }
}

fn format_duration(duration: Duration) -> String {
    if duration.subsec_millis() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ms", duration.as_millis())
    }
}
