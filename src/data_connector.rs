/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Connector entry point
//!
//! [`DataConnector`] is what a host runtime holds: it owns the object type
//! registry and answers `search` and `test_connection` with envelopes.
//! Both operations are infallible; the instance is safe to share.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{ConnectionProperties, ConnectorSettings, ObjectTypeSpec};
use crate::connectors::{build_http_client, ObjectTypeRegistry, RestResource};
use crate::error::{ConnectorError, ConnectorResult};
use crate::models::{ConnectionCheckResult, SearchRequest, SearchResult, TestConnectionRequest};
use crate::services::ResponseAssembler;

/// A directory-search connector over a set of backend resources
pub struct DataConnector {
    registry: ObjectTypeRegistry,
    assembler: ResponseAssembler,
}

impl DataConnector {
    /// Create a connector over handlers registered by the caller
    pub fn new(registry: ObjectTypeRegistry, settings: ConnectorSettings) -> Self {
        tracing::info!(
            object_types = ?registry.entries().iter().map(|e| e.token()).collect::<Vec<_>>(),
            page_size = settings.default_page_size,
            "Data connector initialized"
        );
        DataConnector {
            registry,
            assembler: ResponseAssembler::new(settings),
        }
    }

    /// Create a connector serving REST collections
    ///
    /// One [`RestResource`] is registered per object type, in the given order,
    /// all sharing one HTTP client bounded by the configured call timeout.
    /// Fails when no object type is given.
    pub fn from_properties(
        properties: &HashMap<String, String>,
        object_types: &[ObjectTypeSpec],
        settings: ConnectorSettings,
    ) -> ConnectorResult<Self> {
        if object_types.is_empty() {
            return Err(ConnectorError::InvalidConfiguration(
                "no object types configured".to_string(),
            ));
        }

        let connection = Arc::new(ConnectionProperties::from_map(properties)?);
        let http = build_http_client(settings.call_timeout)?;

        tracing::info!(base_url = %connection.base_url, "Connecting to REST backend");

        let mut registry = ObjectTypeRegistry::new();
        for spec in object_types {
            let mut resource = RestResource::new(&spec.token, &spec.path, connection.clone(), http.clone());
            if let Some(health_path) = &spec.health_path {
                resource = resource.with_health_path(health_path);
            }
            registry.register_with_aliases(Arc::new(resource), &spec.aliases);
        }

        Ok(DataConnector::new(registry, settings))
    }

    /// Search the object type the request addresses
    pub async fn search(&self, request: &SearchRequest) -> SearchResult {
        tracing::info!(
            scope = %request.object_scope,
            filter = %request.filter_expression,
            "Received search request"
        );
        self.assembler.search(&self.registry, request).await
    }

    /// Health check every backend
    pub async fn test_connection(&self, _request: &TestConnectionRequest) -> ConnectionCheckResult {
        tracing::debug!("Running test connection request");
        self.assembler.test_connection(&self.registry).await
    }

    /// Registered object types, in routing order
    pub fn registry(&self) -> &ObjectTypeRegistry {
        &self.registry
    }
}
