/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! REST resource handler
//!
//! Serves one collection of an OpenAPI described backend:
//! `GET {baseUrl}/{path}?index=&max=&page=&search=` returning JSON.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

use crate::config::ConnectionProperties;
use crate::connectors::traits::{records_from_value, BackendResourceHandler};
use crate::error::{ConnectorError, ConnectorResult};
use crate::models::{Record, SearchParameters};

/// Build the HTTP client shared by the REST handlers of one connector
pub fn build_http_client(timeout: Duration) -> ConnectorResult<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
        .map_err(|e| ConnectorError::InvalidConfiguration(format!("Failed to build HTTP client: {e}")))
}

/// Handler for one REST collection
pub struct RestResource {
    object_type: String,

    /// Collection path, relative to the base URL
    path: String,

    /// Dedicated lightweight endpoint, if the backend has one
    health_path: Option<String>,

    connection: Arc<ConnectionProperties>,
    http: Client,
}

impl RestResource {
    /// Create a handler for the collection at `path`
    pub fn new(
        object_type: impl Into<String>,
        path: impl Into<String>,
        connection: Arc<ConnectionProperties>,
        http: Client,
    ) -> Self {
        RestResource {
            object_type: object_type.into(),
            path: path.into(),
            health_path: None,
            connection,
            http,
        }
    }

    /// Health check against `path` instead of a one item fetch
    pub fn with_health_path(mut self, path: impl Into<String>) -> Self {
        self.health_path = Some(path.into());
        self
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self
            .http
            .get(self.connection.url(path))
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.connection.api_key {
            Some(key) => request.header(self.connection.api_key_header.as_str(), key),
            None => request,
        }
    }

    /// Send a request, failing on non-2xx statuses
    async fn send(&self, request: RequestBuilder) -> ConnectorResult<Response> {
        let response = request.send().await.map_err(|e| self.unavailable(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::backend(&self.object_type, format!("HTTP {}", status)));
        }
        Ok(response)
    }

    /// Send a request and decode its JSON body
    async fn send_json(&self, request: RequestBuilder) -> ConnectorResult<Value> {
        self.send(request)
            .await?
            .json::<Value>()
            .await
            .map_err(|e| self.unavailable(&e))
    }

    fn unavailable(&self, error: &reqwest::Error) -> ConnectorError {
        let message = if error.is_timeout() {
            "request timed out".to_string()
        } else if error.is_decode() {
            format!("invalid JSON response: {}", error)
        } else {
            error.to_string()
        };
        ConnectorError::backend(&self.object_type, message)
    }
}

#[async_trait]
impl BackendResourceHandler for RestResource {
    fn object_type(&self) -> &str {
        &self.object_type
    }

    async fn fetch(&self, params: &SearchParameters) -> ConnectorResult<Vec<Record>> {
        tracing::debug!(
            object_type = %self.object_type,
            path = %self.path,
            index = params.index,
            max = params.max,
            page = params.page,
            "Fetching records"
        );

        let payload = self
            .send_json(self.get(&self.path).query(&params.to_query()))
            .await?;

        Ok(records_from_value(payload))
    }

    async fn health_check(&self) -> ConnectorResult<bool> {
        match &self.health_path {
            // Any 2xx counts, unless the body is a plain JSON `false`
            Some(path) => {
                let body = self
                    .send(self.get(path))
                    .await?
                    .text()
                    .await
                    .map_err(|e| self.unavailable(&e))?;
                Ok(body.trim() != "false")
            }
            None => {
                self.send_json(self.get(&self.path).query(&SearchParameters::probe().to_query()))
                    .await?;
                Ok(true)
            }
        }
    }
}
