/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Configuration for the data connector
//!
//! Loads settings from environment variables with sensible defaults. The
//! connection part is kept as a read-only property map, the shape a host
//! runtime hands to a connector.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::error::{ConnectorError, ConnectorResult};
use crate::models::DEFAULT_PAGE_SIZE;

/// Endpoint used when neither `baseUrl` nor `hostname` is configured
pub const DEFAULT_BASE_URL: &str = "https://potterapi-fedeperin.vercel.app/en";

/// Header carrying the API key unless `apiKeyHeader` says otherwise
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

/// Object types served when `CONNECTOR_OBJECT_TYPES` is unset
pub const DEFAULT_OBJECT_TYPES: &str = "books|volume,characters|person,\
houses|gryffindor|slytherin|hufflepuff|ravenclaw,spells|charm|jinx|hex";

/// Property keys understood by [`ConnectionProperties::from_map`]
pub mod keys {
    pub const BASE_URL: &str = "baseUrl";
    pub const HOSTNAME: &str = "hostname";
    pub const API_KEY: &str = "apiKey";
    pub const API_KEY_HEADER: &str = "apiKeyHeader";
}

/// What a search for an unregistered object type returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownObjectPolicy {
    /// OK status with no entries
    #[default]
    Empty,

    /// ERROR status, "unsupported object type"
    Reject,
}

impl UnknownObjectPolicy {
    /// Parse "empty" / "reject", case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "empty" => Some(UnknownObjectPolicy::Empty),
            "reject" => Some(UnknownObjectPolicy::Reject),
            _ => None,
        }
    }
}

/// Dispatch behavior shared by every request
#[derive(Debug, Clone)]
pub struct ConnectorSettings {
    /// Page size when a request carries neither `max` nor `pageSize`
    pub default_page_size: u32,

    /// Upper bound for every single backend call
    pub call_timeout: Duration,

    pub unknown_object_policy: UnknownObjectPolicy,
}

impl Default for ConnectorSettings {
    fn default() -> Self {
        ConnectorSettings {
            default_page_size: DEFAULT_PAGE_SIZE,
            call_timeout: Duration::from_secs(10),
            unknown_object_policy: UnknownObjectPolicy::Empty,
        }
    }
}

/// One object type to register, as configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTypeSpec {
    /// Routing token (e.g., "books")
    pub token: String,

    /// REST path of the collection, relative to the base URL
    pub path: String,

    /// Dedicated health endpoint; without one the collection is probed
    pub health_path: Option<String>,

    /// Extra routing tokens
    pub aliases: Vec<String>,
}

impl ObjectTypeSpec {
    /// Object type served at `/{token}`
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        ObjectTypeSpec {
            path: format!("/{}", token),
            token,
            health_path: None,
            aliases: Vec::new(),
        }
    }

    /// Parse one `token[:path][@health][|alias|alias...]` entry
    pub fn parse(entry: &str) -> Option<Self> {
        let mut parts = entry.split('|');
        let head = parts.next()?.trim();
        let aliases = parts
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .map(String::from)
            .collect();

        let (head, health_path) = match head.split_once('@') {
            Some((head, health)) => (head, Some(health.trim()).filter(|h| !h.is_empty())),
            None => (head, None),
        };

        let (token, path) = match head.split_once(':') {
            Some((token, path)) => (token.trim(), path.trim()),
            None => (head, ""),
        };
        if token.is_empty() {
            return None;
        }

        let path = if path.is_empty() {
            format!("/{}", token)
        } else {
            absolute(path)
        };

        Some(ObjectTypeSpec {
            token: token.to_string(),
            path,
            health_path: health_path.map(absolute),
            aliases,
        })
    }

    /// Parse a comma separated list, skipping empty and invalid entries
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split(',')
            .filter(|entry| !entry.trim().is_empty())
            .filter_map(|entry| {
                let spec = ObjectTypeSpec::parse(entry);
                if spec.is_none() {
                    tracing::warn!(entry, "Ignoring invalid object type entry");
                }
                spec
            })
            .collect()
    }
}

fn absolute(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Typed view over the connection property map
#[derive(Debug, Clone)]
pub struct ConnectionProperties {
    /// Base URL without trailing slash
    pub base_url: String,

    pub api_key: Option<String>,

    pub api_key_header: String,
}

impl ConnectionProperties {
    /// Read `baseUrl` / `hostname` / `apiKey` / `apiKeyHeader`
    ///
    /// `baseUrl` wins over `hostname`; a bare hostname is served over https.
    /// With neither, [`DEFAULT_BASE_URL`] is used.
    pub fn from_map(properties: &HashMap<String, String>) -> ConnectorResult<Self> {
        let non_blank = |key: &str| {
            properties
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let base_url = match (non_blank(keys::BASE_URL), non_blank(keys::HOSTNAME)) {
            (Some(url), _) => url.to_string(),
            (None, Some(host)) if host.contains("://") => host.to_string(),
            (None, Some(host)) => format!("https://{}", host),
            (None, None) => DEFAULT_BASE_URL.to_string(),
        };

        reqwest::Url::parse(&base_url).map_err(|e| {
            ConnectorError::InvalidConfiguration(format!("invalid base URL {:?}: {}", base_url, e))
        })?;

        Ok(ConnectionProperties {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: non_blank(keys::API_KEY).map(String::from),
            api_key_header: non_blank(keys::API_KEY_HEADER)
                .unwrap_or(DEFAULT_API_KEY_HEADER)
                .to_string(),
        })
    }

    /// Absolute URL of a path below the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL where the host surface is accessible
    pub url: String,

    /// Port to listen on
    pub port: u16,

    /// Read-only connection properties handed to the connector
    pub connection: HashMap<String, String>,

    /// Object types, in routing order
    pub object_types: Vec<ObjectTypeSpec>,

    pub settings: ConnectorSettings,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - CONNECTOR_PORT: Port number (default: 6810)
    /// - CONNECTOR_URL: Public URL of the host surface (default: "http://localhost:{port}")
    /// - CONNECTOR_BASE_URL / CONNECTOR_HOSTNAME: Backend location
    /// - CONNECTOR_API_KEY / CONNECTOR_API_KEY_HEADER: Optional API key
    /// - CONNECTOR_OBJECT_TYPES: "token[:path][@health][|alias...]" list (default: [`DEFAULT_OBJECT_TYPES`])
    /// - CONNECTOR_PAGE_SIZE: Default page size (default: 10)
    /// - CONNECTOR_TIMEOUT_SECS: Per backend call timeout (default: 10)
    /// - CONNECTOR_UNKNOWN_OBJECT_POLICY: "empty" or "reject" (default: empty)
    pub fn from_env() -> Self {
        // Try to load .env file, but don't fail if it doesn't exist
        let _ = dotenvy::dotenv();

        Config::from_vars(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();

        let port = var("CONNECTOR_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let url = var("CONNECTOR_URL").unwrap_or_else(|| format!("http://localhost:{}", port));

        let connection = [
            ("CONNECTOR_BASE_URL", keys::BASE_URL),
            ("CONNECTOR_HOSTNAME", keys::HOSTNAME),
            ("CONNECTOR_API_KEY", keys::API_KEY),
            ("CONNECTOR_API_KEY_HEADER", keys::API_KEY_HEADER),
        ]
        .into_iter()
        .filter_map(|(name, key)| var(name).map(|value| (key.to_string(), value)))
        .collect();

        let object_types = var("CONNECTOR_OBJECT_TYPES")
            .map(|list| ObjectTypeSpec::parse_list(&list))
            .unwrap_or(defaults.object_types);

        let default_page_size = var("CONNECTOR_PAGE_SIZE")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(defaults.settings.default_page_size);

        let call_timeout = var("CONNECTOR_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.settings.call_timeout);

        let unknown_object_policy = match var("CONNECTOR_UNKNOWN_OBJECT_POLICY") {
            Some(value) => UnknownObjectPolicy::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown CONNECTOR_UNKNOWN_OBJECT_POLICY, using \"empty\"");
                UnknownObjectPolicy::Empty
            }),
            None => defaults.settings.unknown_object_policy,
        };

        Config {
            url,
            port,
            connection,
            object_types,
            settings: ConnectorSettings {
                default_page_size,
                call_timeout,
                unknown_object_policy,
            },
        }
    }

    /// Get the full server URL including port
    pub fn server_url(&self) -> &str {
        &self.url
    }

    /// Connection properties as handed to the connector
    pub fn connection_properties(&self) -> &HashMap<String, String> {
        &self.connection
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: "http://localhost:6810".to_string(),
            port: 6810,
            connection: HashMap::new(),
            object_types: ObjectTypeSpec::parse_list(DEFAULT_OBJECT_TYPES),
            settings: ConnectorSettings::default(),
        }
    }
}
