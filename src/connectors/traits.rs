/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Backend resource handler trait
//!
//! One handler serves one object type (books, characters, accounts, ...).
//! Handlers hold their connection configuration from construction on and
//! keep no other state, so a single instance is shared by concurrent requests.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ConnectorResult;
use crate::models::{Record, SearchParameters};

/// A backend collection the connector can search and health check
#[async_trait]
pub trait BackendResourceHandler: Send + Sync {
    /// Object type served by this handler (e.g., "books")
    fn object_type(&self) -> &str;

    /// Fetch the records of one page
    ///
    /// Fails with `BackendUnavailable` on any transport or status error;
    /// an empty vector always means the backend answered with no data.
    async fn fetch(&self, params: &SearchParameters) -> ConnectorResult<Vec<Record>>;

    /// Perform the cheapest call the backend supports
    ///
    /// Returns `Ok(false)` when the backend answered but reported itself
    /// unhealthy, `Err` when it could not be reached.
    async fn health_check(&self) -> ConnectorResult<bool>;
}

/// Normalize a backend payload into records
///
/// Arrays give one record per element, an object gives a single record,
/// `null` gives nothing. Scalars (including non-object array elements)
/// are wrapped as `{"value": ...}`.
pub fn records_from_value(value: Value) -> Vec<Record> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().map(record_from_item).collect(),
        other => vec![record_from_item(other)],
    }
}

fn record_from_item(item: Value) -> Record {
    match item {
        Value::Object(record) => record,
        scalar => {
            let mut record = Record::new();
            record.insert("value".to_string(), scalar);
            record
        }
    }
}
