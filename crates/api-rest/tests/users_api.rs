//! End-to-end tests for the users REST API.
//!
//! Each test builds its own app over a fresh store and drives it in-process.

use api_rest::UsersApp;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashSet;
use tower::ServiceExt;
use users_core::UserStore;

const NIL_ID: &str = "00000000-0000-0000-0000-000000000000";

fn app() -> UsersApp {
    api_rest::app(UserStore::new())
}

async fn send_raw(
    app: &UsersApp,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    let request = builder
        .body(Body::from(body.to_owned()))
        .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("app is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();

    (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
}

async fn send(app: &UsersApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, text) = match body {
        Some(body) => {
            send_raw(
                app,
                method,
                uri,
                Some("application/json"),
                &body.to_string(),
            )
            .await
        }
        None => send_raw(app, method, uri, None, "").await,
    };

    let value = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).expect("response should be JSON")
    };
    (status, value)
}

async fn create(app: &UsersApp, body: Value) -> Value {
    let (status, user) = send(app, Method::POST, "/api/users", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    user
}

fn message(text: &str) -> Value {
    json!({ "message": text })
}

#[tokio::test]
async fn test_list_starts_empty() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = app();

    let created = create(&app, json!({"username": "alice", "age": 30})).await;
    let id = created["id"].as_str().expect("id should be a string");

    assert_eq!(created["username"], "alice");
    assert_eq!(created["age"], 30);
    assert_eq!(created["hobbies"], json!([]));

    let (status, fetched) = send(&app, Method::GET, &format!("/api/users/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_assigns_unique_ids() {
    let app = app();
    let mut ids = HashSet::new();

    for i in 0..20 {
        let user = create(&app, json!({"username": format!("user{}", i), "age": 20 + i})).await;
        ids.insert(user["id"].as_str().unwrap().to_owned());
    }

    assert_eq!(ids.len(), 20);
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = app();

    let created = create(&app, json!({"id": NIL_ID, "username": "eve", "age": 22})).await;

    assert_ne!(created["id"], NIL_ID);
    let (status, _) = send(&app, Method::GET, &format!("/api/users/{}", NIL_ID), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_returns_insertion_order() {
    let app = app();
    create(&app, json!({"username": "first", "age": 1})).await;
    create(&app, json!({"username": "second", "age": 2, "hobbies": ["chess"]})).await;

    let (status, body) = send(&app, Method::GET, "/api/users", None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["first", "second"]);
    assert_eq!(body[1]["hobbies"], json!(["chess"]));
}

#[tokio::test]
async fn test_get_invalid_id_format() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/users/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, message("Invalid userId format"));
}

#[tokio::test]
async fn test_get_unknown_id() {
    let app = app();

    let (status, body) = send(&app, Method::GET, &format!("/api/users/{}", NIL_ID), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, message("User not found"));
}

#[tokio::test]
async fn test_get_unknown_version_or_variant_is_invalid_format() {
    let app = app();
    let unknown_version = "550e8400-e29b-01d4-0716-446655440000";
    let non_rfc_variant = "550e8400-e29b-41d4-c716-446655440000";

    for id in [unknown_version, non_rfc_variant] {
        let (status, body) = send(&app, Method::GET, &format!("/api/users/{}", id), None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "id {}", id);
        assert_eq!(body, message("Invalid userId format"));
    }
}

#[tokio::test]
async fn test_get_nil_and_max_ids_are_well_formed() {
    let app = app();

    for id in [NIL_ID, "ffffffff-ffff-ffff-ffff-ffffffffffff"] {
        let (status, body) = send(&app, Method::GET, &format!("/api/users/{}", id), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "id {}", id);
        assert_eq!(body, message("User not found"));
    }
}

#[tokio::test]
async fn test_get_uppercased_id_does_not_match() {
    let app = app();
    let created = create(&app, json!({"username": "alice", "age": 30})).await;
    let id = created["id"].as_str().unwrap();
    let upper = id.to_uppercase();

    let (status, _) = send(&app, Method::GET, &format!("/api/users/{}", upper), None).await;

    if upper == id {
        assert_eq!(status, StatusCode::OK);
    } else {
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_create_requires_age() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"username": "bob"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, message("Username and age are required fields"));
}

#[tokio::test]
async fn test_create_rejects_zero_age() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"username": "bob", "age": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, message("Username and age are required fields"));
}

#[tokio::test]
async fn test_create_rejects_empty_username() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"username": "", "age": 40})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, message("Username and age are required fields"));
}

#[tokio::test]
async fn test_create_rejects_malformed_hobbies() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"username": "bob", "age": 40, "hobbies": "chess"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, message("Hobbies must be an array of strings"));
}

#[tokio::test]
async fn test_create_without_json_content_type_is_missing_fields() {
    let app = app();

    let (status, text) = send_raw(
        &app,
        Method::POST,
        "/api/users",
        Some("text/plain"),
        r#"{"username":"bob","age":3}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.contains("Username and age are required fields"));
}

#[tokio::test]
async fn test_create_with_malformed_json_is_internal_error() {
    let app = app();

    let (status, text) = send_raw(
        &app,
        Method::POST,
        "/api/users",
        Some("application/json"),
        r#"{"username": "bob", "#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body, message("Internal Server Error"));
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let app = app();
    let created = create(
        &app,
        json!({"username": "carol", "age": 28, "hobbies": ["running", "reading"]}),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", id),
        Some(json!({"username": "caroline", "age": 29})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({"id": id, "username": "caroline", "age": 29, "hobbies": []})
    );

    let (_, fetched) = send(&app, Method::GET, &format!("/api/users/{}", id), None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_keeps_path_id_over_body_id() {
    let app = app();
    let created = create(&app, json!({"username": "dan", "age": 50})).await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", id),
        Some(json!({"id": NIL_ID, "username": "dan", "age": 51})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
}

#[tokio::test]
async fn test_update_keeps_position_in_list() {
    let app = app();
    create(&app, json!({"username": "a", "age": 1})).await;
    let middle = create(&app, json!({"username": "b", "age": 2})).await;
    create(&app, json!({"username": "c", "age": 3})).await;

    send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", middle["id"].as_str().unwrap()),
        Some(json!({"username": "bee", "age": 2})),
    )
    .await;

    let (_, list) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(list[1]["username"], "bee");
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_check_order() {
    let app = app();

    // Invalid format wins over everything else.
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users/nope",
        Some(json!({"username": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, message("Invalid userId format"));

    // Unknown user is reported before missing fields.
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", NIL_ID),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, message("User not found"));

    // Existing user with missing fields.
    let created = create(&app, json!({"username": "x", "age": 9})).await;
    let id = created["id"].as_str().unwrap();
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", id),
        Some(json!({"username": "x", "age": false})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, message("Username and age are required fields"));

    // The failed update left the record untouched.
    let (_, fetched) = send(&app, Method::GET, &format!("/api/users/{}", id), None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_delete_then_get_and_delete_again() {
    let app = app();
    let created = create(&app, json!({"username": "frank", "age": 60})).await;
    let uri = format!("/api/users/{}", created["id"].as_str().unwrap());

    let (status, text) = send_raw(&app, Method::DELETE, &uri, None, "").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(text.is_empty());

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, message("User not found"));

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, message("User not found"));
}

#[tokio::test]
async fn test_delete_invalid_id_format() {
    let app = app();

    let (status, body) = send(&app, Method::DELETE, "/api/users/123", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, message("Invalid userId format"));
}

#[tokio::test]
async fn test_unmatched_route() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/nonexistent", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, message("Endpoint not found"));
}

#[tokio::test]
async fn test_unsupported_method_on_known_path() {
    let app = app();

    let (status, body) = send(&app, Method::PATCH, &format!("/api/users/{}", NIL_ID), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, message("Endpoint not found"));

    let (status, body) = send(&app, Method::DELETE, "/api/users", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, message("Endpoint not found"));
}

#[tokio::test]
async fn test_trailing_slash_is_tolerated() {
    let app = app();
    create(&app, json!({"username": "gina", "age": 33})).await;

    let (status, body) = send(&app, Method::GET, "/api/users/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_users_path_is_case_insensitive() {
    let app = app();
    let created = create(&app, json!({"username": "hal", "age": 9})).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::GET, "/API/USERS", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, &format!("/Api/Users/{}/", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "hal");

    let (status, body) = send(&app, Method::GET, "/API/NONEXISTENT", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, message("Endpoint not found"));
}

#[tokio::test]
async fn test_apps_over_separate_stores_are_independent() {
    let first = app();
    let second = app();
    create(&first, json!({"username": "solo", "age": 1})).await;

    let (_, body) = send(&second, Method::GET, "/api/users", None).await;

    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_responses_are_json() {
    let app = app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/nonexistent")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    let content_type = response.headers().get(CONTENT_TYPE).unwrap();
    assert_eq!(content_type, "application/json");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/users"].is_object());
}
