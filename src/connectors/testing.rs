/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! In-memory handler for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::connectors::traits::{records_from_value, BackendResourceHandler};
use crate::error::{ConnectorError, ConnectorResult};
use crate::models::{Record, SearchParameters};

/// Handler answering from memory and counting its calls
pub struct StaticHandler {
    object_type: String,
    records: Vec<Record>,
    failure: Option<String>,
    healthy: bool,
    delay: Option<Duration>,
    fetches: AtomicUsize,
    checks: AtomicUsize,
    last_params: Mutex<Option<SearchParameters>>,
}

impl StaticHandler {
    pub fn new(object_type: &str) -> Self {
        StaticHandler {
            object_type: object_type.to_string(),
            records: Vec::new(),
            failure: None,
            healthy: true,
            delay: None,
            fetches: AtomicUsize::new(0),
            checks: AtomicUsize::new(0),
            last_params: Mutex::new(None),
        }
    }

    pub fn with_records(mut self, payload: Value) -> Self {
        self.records = records_from_value(payload);
        self
    }

    /// Every call fails with `BackendUnavailable(message)`
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Health check answers `Ok(false)`
    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    pub fn last_params(&self) -> Option<SearchParameters> {
        self.last_params.lock().unwrap().clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn outcome(&self) -> ConnectorResult<()> {
        match &self.failure {
            Some(message) => Err(ConnectorError::backend(&self.object_type, message.as_str())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BackendResourceHandler for StaticHandler {
    fn object_type(&self) -> &str {
        &self.object_type
    }

    async fn fetch(&self, params: &SearchParameters) -> ConnectorResult<Vec<Record>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        *self.last_params.lock().unwrap() = Some(params.clone());
        self.pause().await;
        self.outcome()?;
        Ok(self.records.clone())
    }

    async fn health_check(&self) -> ConnectorResult<bool> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.outcome()?;
        Ok(self.healthy)
    }
}
