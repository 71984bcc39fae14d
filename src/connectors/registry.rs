/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Object type registry
//!
//! Ordered list of (token matcher, handler) pairs. The order in which handlers
//! are registered is the order in which the router tests them, so it is part of
//! the connector's configuration. The registry is built once and only read
//! afterwards.

use std::sync::Arc;

use serde::Serialize;

use crate::connectors::traits::BackendResourceHandler;

/// One registered object type
#[derive(Clone)]
pub struct ObjectTypeEntry {
    /// Primary token, lowercase
    token: String,

    /// Additional lowercase tokens routing to the same handler
    aliases: Vec<String>,

    handler: Arc<dyn BackendResourceHandler>,
}

impl ObjectTypeEntry {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn handler(&self) -> &Arc<dyn BackendResourceHandler> {
        &self.handler
    }

    /// Whether `haystack` (already lowercase) contains the token or an alias
    pub fn matches(&self, haystack: &str) -> bool {
        std::iter::once(&self.token)
            .chain(self.aliases.iter())
            .any(|token| haystack.contains(token.as_str()))
    }

    /// Serializable description for listings
    pub fn describe(&self) -> ObjectTypeInfo {
        ObjectTypeInfo {
            object_type: self.token.clone(),
            aliases: self.aliases.clone(),
        }
    }
}

/// Object type as listed by the host surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeInfo {
    pub object_type: String,
    pub aliases: Vec<String>,
}

/// Registry of the object types a connector serves
#[derive(Clone, Default)]
pub struct ObjectTypeRegistry {
    entries: Vec<ObjectTypeEntry>,
}

impl ObjectTypeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ObjectTypeRegistry {
            entries: Vec::new(),
        }
    }

    /// Register a handler under its own object type
    pub fn register(&mut self, handler: Arc<dyn BackendResourceHandler>) {
        self.register_with_aliases(handler, Vec::<String>::new());
    }

    /// Register a handler under its object type plus alias tokens
    ///
    /// Tokens are matched case-insensitively. Blank tokens are ignored.
    pub fn register_with_aliases<I, S>(&mut self, handler: Arc<dyn BackendResourceHandler>, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let token = handler.object_type().trim().to_lowercase();
        if self.get(&token).is_some() {
            tracing::warn!(object_type = %token, "Object type registered twice, the first registration wins");
        }

        let aliases = aliases
            .into_iter()
            .map(|alias| alias.as_ref().trim().to_lowercase())
            .filter(|alias| !alias.is_empty() && *alias != token)
            .collect();

        self.entries.push(ObjectTypeEntry {
            token,
            aliases,
            handler,
        });
    }

    /// All entries, in registration order
    pub fn entries(&self) -> &[ObjectTypeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an entry by its exact primary token
    pub fn get(&self, token: &str) -> Option<&ObjectTypeEntry> {
        let token = token.to_lowercase();
        self.entries.iter().find(|entry| entry.token == token)
    }

    /// First entry, in registration order, whose tokens occur in `text`
    pub fn find_in(&self, text: &str) -> Option<&ObjectTypeEntry> {
        let haystack = text.to_lowercase();
        self.entries.iter().find(|entry| entry.matches(&haystack))
    }
}
