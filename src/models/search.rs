/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Search request and search result models

use std::collections::{BTreeMap, HashMap};

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ConnectorError;

/// Page size used when a request carries neither `max` nor `pageSize`
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One entry of a search result: attribute name to value
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Search request as handed over by the host runtime
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Base DN, object type token or attribute filter naming the target collection
    #[serde(default, alias = "baseDn")]
    pub object_scope: String,

    /// Free-form filter expression, e.g. "(objectClass=books)"
    #[serde(default, alias = "filter")]
    pub filter_expression: String,

    /// Pagination and free-text search knobs
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

impl SearchRequest {
    /// Create a request addressed by scope only
    pub fn new(object_scope: impl Into<String>) -> Self {
        SearchRequest {
            object_scope: object_scope.into(),
            ..Default::default()
        }
    }

    /// Set the filter expression
    pub fn with_filter(mut self, filter_expression: impl Into<String>) -> Self {
        self.filter_expression = filter_expression.into();
        self
    }

    /// Add one raw parameter
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Typed pagination parameters with every default applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    /// Position of the single item to return
    pub index: u32,

    /// Maximum number of items (the page size)
    pub max: u32,

    /// Page number, starting at 1
    pub page: u32,

    /// Free-text search term
    pub search: Option<String>,

    /// Parameters this connector does not interpret, kept for forward compatibility
    pub extra: BTreeMap<String, String>,
}

impl SearchParameters {
    /// Parameters for the cheapest possible call: a single item
    pub fn probe() -> Self {
        SearchParameters {
            max: 1,
            ..SearchParameters::with_page_size(DEFAULT_PAGE_SIZE)
        }
    }

    /// Defaults only, with the given page size
    pub fn with_page_size(page_size: u32) -> Self {
        SearchParameters {
            index: 0,
            max: page_size,
            page: 1,
            search: None,
            extra: BTreeMap::new(),
        }
    }

    /// Parse the raw parameter map of a request
    ///
    /// Missing or malformed numbers fall back to their defaults. `max` wins over
    /// `pageSize` when both are present. An empty `search` is treated as unset.
    pub fn from_map(raw: &HashMap<String, String>, default_page_size: u32) -> Self {
        let mut params = SearchParameters::with_page_size(default_page_size);

        params.index = parse_or_default(raw, "index", params.index);
        params.page = parse_or_default(raw, "page", params.page);
        params.max = if raw.contains_key("max") {
            parse_or_default(raw, "max", default_page_size)
        } else {
            parse_or_default(raw, "pageSize", default_page_size)
        };
        params.search = raw
            .get("search")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from);

        params.extra = raw
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "index" | "max" | "pageSize" | "page" | "search"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        params
    }

    /// Query string pairs for the outbound REST call
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("index", self.index.to_string()),
            ("max", self.max.to_string()),
            ("page", self.page.to_string()),
        ];
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        query
    }
}

fn parse_or_default(raw: &HashMap<String, String>, key: &str, default: u32) -> u32 {
    match raw.get(key) {
        None => default,
        Some(value) => match value.trim().parse::<u32>() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!(key, value = %value, default, "Malformed search parameter, using default");
                default
            }
        },
    }
}

/// Overall status of an envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    Ok,
    Error,
}

/// Why an envelope carries the ERROR status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    BackendUnavailable,
    UnknownObjectType,
    InvalidConfiguration,
    NotFound,
}

impl ErrorKind {
    /// HTTP status the host surface answers with
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::BackendUnavailable => StatusCode::BAD_GATEWAY,
            ErrorKind::UnknownObjectType => StatusCode::BAD_REQUEST,
            ErrorKind::InvalidConfiguration => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<&ConnectorError> for ErrorKind {
    fn from(error: &ConnectorError) -> Self {
        match error {
            ConnectorError::BackendUnavailable { .. } => ErrorKind::BackendUnavailable,
            ConnectorError::UnknownObjectType(_) => ErrorKind::UnknownObjectType,
            ConnectorError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            ConnectorError::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Result envelope of a search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub status: ResultStatus,

    /// Records in backend order
    pub entries: Vec<Record>,

    pub total_count: usize,

    /// Human-readable error, only set on ERROR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl SearchResult {
    /// Successful result wrapping the given records
    pub fn ok(entries: Vec<Record>) -> Self {
        SearchResult {
            status: ResultStatus::Ok,
            total_count: entries.len(),
            entries,
            message: None,
            error_kind: None,
        }
    }

    /// Failed result carrying the error's message
    pub fn error(error: &ConnectorError) -> Self {
        SearchResult {
            status: ResultStatus::Error,
            entries: Vec::new(),
            total_count: 0,
            message: Some(error.to_string()),
            error_kind: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResultStatus::Ok
    }

    /// HTTP status the host surface answers with
    pub fn status_code(&self) -> StatusCode {
        match self.error_kind {
            Some(kind) => kind.status_code(),
            None => StatusCode::OK,
        }
    }
}
