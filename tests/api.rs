/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! End-to-end tests of the HTTP host surface against a mocked REST backend.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use data_connector::{Config, ConnectorSettings, DataConnector, ObjectTypeSpec, UnknownObjectPolicy};

// =============================================================================
// Test Helpers
// =============================================================================

fn app(server: &MockServer, policy: UnknownObjectPolicy) -> Router {
    let properties = HashMap::from([("baseUrl".to_string(), server.uri())]);
    let object_types = ObjectTypeSpec::parse_list("books,characters,houses|gryffindor|slytherin,spells");
    let settings = ConnectorSettings {
        call_timeout: Duration::from_secs(2),
        unknown_object_policy: policy,
        ..ConnectorSettings::default()
    };

    let connector = DataConnector::from_properties(&properties, &object_types, settings).unwrap();
    data_connector::router(Arc::new(Config::default()), Arc::new(connector))
}

async fn mount_json(server: &MockServer, route: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn search_by_base_dn() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/books",
        200,
        json!([{"title": "Philosopher's Stone"}, {"title": "Chamber of Secrets"}]),
    )
    .await;

    let (status, body) = send(
        app(&server, UnknownObjectPolicy::Empty),
        post("/api/search", json!({"objectScope": "ou=books,dc=example,dc=com"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["totalCount"], 2);
    assert_eq!(body["entries"][0]["title"], "Philosopher's Stone");
    assert_eq!(body["entries"][1]["title"], "Chamber of Secrets");
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn search_by_alias_and_filter() {
    let server = MockServer::start().await;
    mount_json(&server, "/houses", 200, json!([{"house": "Gryffindor"}])).await;

    let (status, body) = send(
        app(&server, UnknownObjectPolicy::Empty),
        post(
            "/api/search",
            json!({"baseDn": "dc=example,dc=com", "filter": "(objectClass=Gryffindor)"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"][0]["house"], "Gryffindor");
}

#[tokio::test]
async fn search_unknown_object_type_is_empty() {
    let server = MockServer::start().await;

    let (status, body) = send(
        app(&server, UnknownObjectPolicy::Empty),
        post("/api/search", json!({"objectScope": "ou=unknown,dc=example,dc=com"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["entries"], json!([]));
}

#[tokio::test]
async fn search_unknown_object_type_can_be_rejected() {
    let server = MockServer::start().await;

    let (status, body) = send(
        app(&server, UnknownObjectPolicy::Reject),
        post("/api/search", json!({"objectScope": "ou=unknown,dc=example,dc=com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "ERROR");
    assert_eq!(body["errorKind"], "UNKNOWN_OBJECT_TYPE");
}

#[tokio::test]
async fn search_backend_failure_is_an_error_envelope() {
    let server = MockServer::start().await;
    mount_json(&server, "/spells", 500, json!({"error": "boom"})).await;

    let (status, body) = send(
        app(&server, UnknownObjectPolicy::Empty),
        post(
            "/api/search",
            json!({"objectScope": "spells", "parameters": {"max": "oops"}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], "ERROR");
    assert_eq!(body["entries"], json!([]));
    assert!(body["message"].as_str().unwrap().contains("spells"));
}

// =============================================================================
// Test connection
// =============================================================================

#[tokio::test]
async fn test_connection_all_healthy() {
    let server = MockServer::start().await;
    for route in ["/books", "/characters", "/houses", "/spells"] {
        mount_json(&server, route, 200, json!([])).await;
    }

    let (status, body) = send(
        app(&server, UnknownObjectPolicy::Empty),
        post("/api/test-connection", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["backends"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_connection_names_the_failing_backend() {
    let server = MockServer::start().await;
    for route in ["/books", "/houses", "/spells"] {
        mount_json(&server, route, 200, json!([])).await;
    }
    mount_json(&server, "/characters", 503, json!({})).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/test-connection")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(&server, UnknownObjectPolicy::Empty), request).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], "ERROR");
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("characters:"), "unexpected message: {message}");
    assert!(!message.contains("books"));
    assert_eq!(body["backends"][1]["healthy"], false);
    assert_eq!(body["backends"][0]["healthy"], true);
}

#[tokio::test]
async fn test_connection_uses_configured_health_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let properties = HashMap::from([("baseUrl".to_string(), server.uri())]);
    let object_types = ObjectTypeSpec::parse_list("books@/status");
    let connector = DataConnector::from_properties(&properties, &object_types, ConnectorSettings::default()).unwrap();
    let app = data_connector::router(Arc::new(Config::default()), Arc::new(connector));

    let (status, body) = send(app, post("/api/test-connection", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backends"][0]["objectType"], "books");
    assert_eq!(body["backends"][0]["healthy"], true);
}

// =============================================================================
// Object types and health
// =============================================================================

#[tokio::test]
async fn object_types_are_listed_in_routing_order() {
    let server = MockServer::start().await;

    let (status, body) = send(app(&server, UnknownObjectPolicy::Empty), get("/api/object-types")).await;

    assert_eq!(status, StatusCode::OK);
    let tokens: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["objectType"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(tokens, ["books", "characters", "houses", "spells"]);
    assert_eq!(body[2]["aliases"], json!(["gryffindor", "slytherin"]));
}

#[tokio::test]
async fn unknown_object_type_lookup_is_404() {
    let server = MockServer::start().await;

    let (status, body) = send(
        app(&server, UnknownObjectPolicy::Empty),
        get("/api/object-types/wands"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], true);

    let (status, body) = send(
        app(&server, UnknownObjectPolicy::Empty),
        get("/api/object-types/spells"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["objectType"], "spells");
}

#[tokio::test]
async fn health_endpoint_reports_service() {
    let server = MockServer::start().await;

    let (status, body) = send(app(&server, UnknownObjectPolicy::Empty), get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "data-connector");
    assert_eq!(body["url"], "http://localhost:6810");
}
