/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Request routing
//!
//! Picks the object type a search targets. The object scope (base DN or
//! token) is tested first; only when it names no registered object type are
//! the `objectClass` / `objectType` assertions of the filter consulted.
//! Within each source the registry order decides.

use crate::connectors::{ObjectTypeEntry, ObjectTypeRegistry};
use crate::models::SearchRequest;

/// Filter attributes that name an object type
const OBJECT_TYPE_ATTRIBUTES: [&str; 2] = ["objectclass", "objecttype"];

/// Where the routing decision came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSource {
    Scope,
    Filter,
}

/// Outcome of a successful routing
#[derive(Clone, Copy)]
pub struct Route<'a> {
    pub entry: &'a ObjectTypeEntry,
    pub source: RouteSource,
}

/// Resolve a request to at most one registered object type
pub fn route<'a>(registry: &'a ObjectTypeRegistry, request: &SearchRequest) -> Option<Route<'a>> {
    if let Some(entry) = registry.find_in(&request.object_scope) {
        return Some(Route {
            entry,
            source: RouteSource::Scope,
        });
    }

    filter_object_types(&request.filter_expression)
        .into_iter()
        .find_map(|value| registry.find_in(value))
        .map(|entry| Route {
            entry,
            source: RouteSource::Filter,
        })
}

/// Values of `(objectClass=...)` and `(objectType=...)` assertions
///
/// Works on flat and composite filters alike, e.g.
/// `(&(objectClass=books)(title=*stone*))`. Wildcard-only values are skipped.
pub fn filter_object_types(filter: &str) -> Vec<&str> {
    filter
        .split(['(', ')'])
        .filter_map(|assertion| assertion.split_once('='))
        .filter(|(attribute, _)| {
            let attribute = attribute.trim().to_lowercase();
            OBJECT_TYPE_ATTRIBUTES.contains(&attribute.as_str())
        })
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty() && *value != "*")
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::connectors::testing::StaticHandler;

    fn registry() -> ObjectTypeRegistry {
        let mut registry = ObjectTypeRegistry::new();
        for token in ["books", "characters", "houses", "spells"] {
            registry.register(Arc::new(StaticHandler::new(token)));
        }
        registry
    }

    fn routed(request: SearchRequest) -> Option<(String, RouteSource)> {
        let registry = registry();
        route(&registry, &request).map(|r| (r.entry.token().to_string(), r.source))
    }

    #[test]
    fn base_dn_selects_handler() {
        assert_eq!(
            routed(SearchRequest::new("ou=books,dc=example,dc=com")),
            Some(("books".to_string(), RouteSource::Scope))
        );
    }

    #[test]
    fn scope_matching_ignores_case() {
        assert_eq!(
            routed(SearchRequest::new("OU=Characters,DC=Example")).map(|(t, _)| t),
            Some("characters".to_string())
        );
        assert_eq!(
            routed(SearchRequest::new("SPELLS")).map(|(t, _)| t),
            Some("spells".to_string())
        );
    }

    #[test]
    fn filter_is_used_when_scope_names_nothing() {
        let request = SearchRequest::new("dc=example,dc=com").with_filter("(&(objectClass=Houses)(name=*))");
        assert_eq!(routed(request), Some(("houses".to_string(), RouteSource::Filter)));

        let request = SearchRequest::new("").with_filter("(objectType=spells)");
        assert_eq!(routed(request), Some(("spells".to_string(), RouteSource::Filter)));
    }

    #[test]
    fn scope_wins_over_filter() {
        let request = SearchRequest::new("ou=books,dc=example").with_filter("(objectClass=spells)");
        assert_eq!(routed(request).map(|(t, _)| t), Some("books".to_string()));
    }

    #[test]
    fn unknown_scope_does_not_route() {
        assert_eq!(routed(SearchRequest::new("ou=unknown,dc=example,dc=com")), None);
        assert_eq!(routed(SearchRequest::new("").with_filter("(cn=books)")), None);
    }

    #[test]
    fn filter_values_are_extracted() {
        assert_eq!(
            filter_object_types("(|(objectClass=books)(OBJECTTYPE = spells )(objectClass=*)(cn=x))"),
            vec!["books", "spells"]
        );
        assert!(filter_object_types("").is_empty());
        assert!(filter_object_types("objectClass").is_empty());
    }
}
