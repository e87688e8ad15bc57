//! Integration tests for the users CRUD API, exercised through the full
//! router with a valid API key.

mod common;

use axum::http::StatusCode;
use common::{authed_get, authed_json, send, test_router, InMemoryApiKeyRepository};
use serde_json::json;
use std::sync::Arc;

fn router() -> axum::Router {
    test_router(Arc::new(InMemoryApiKeyRepository::seeded("Test Client")))
}

#[tokio::test]
async fn create_user_returns_created_record() {
    let app = router();

    let (status, body) = send(
        app,
        authed_json(
            "POST",
            "/api/v1/users/",
            json!({"username": "jdoe", "email": "jdoe@example.com", "full_name": "Jane Doe"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert_eq!(body["username"], "jdoe");
    assert_eq!(body["email"], "jdoe@example.com");
    assert_eq!(body["full_name"], "Jane Doe");
    assert_eq!(body["id"], 1);
    assert!(body["uuid"].as_str().is_some());
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = router();
    let payload = json!({"username": "jdoe", "email": "jdoe@example.com", "full_name": "Jane Doe"});

    let (status, _) = send(app.clone(), authed_json("POST", "/api/v1/users/", payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, authed_json("POST", "/api/v1/users/", payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.unwrap(), json!({"error": "user already exists"}));
}

#[tokio::test]
async fn blank_username_is_rejected() {
    let app = router();

    let (status, body) = send(
        app,
        authed_json(
            "POST",
            "/api/v1/users/",
            json!({"username": "  ", "email": "jdoe@example.com", "full_name": "Jane Doe"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap(), json!({"error": "invalid user input"}));
}

#[tokio::test]
async fn list_returns_created_users() {
    let app = router();
    send(
        app.clone(),
        authed_json(
            "POST",
            "/api/v1/users/",
            json!({"username": "jdoe", "email": "jdoe@example.com", "full_name": "Jane Doe"}),
        ),
    )
    .await;

    let (status, body) = send(app, authed_get("/api/v1/users/")).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.unwrap();
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["username"], "jdoe");
}

#[tokio::test]
async fn get_by_username_and_id_and_uuid() {
    let app = router();
    let (_, created) = send(
        app.clone(),
        authed_json(
            "POST",
            "/api/v1/users/",
            json!({"username": "jdoe", "email": "jdoe@example.com", "full_name": "Jane Doe"}),
        ),
    )
    .await;
    let created = created.unwrap();
    let uuid = created["uuid"].as_str().unwrap();

    let (status, body) = send(app.clone(), authed_get("/api/v1/users/username/jdoe")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["username"], "jdoe");

    let (status, body) = send(app.clone(), authed_get("/api/v1/users/id/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["id"], 1);

    let (status, body) = send(app, authed_get(&format!("/api/v1/users/uuid/{uuid}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["uuid"], uuid);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = router();

    let (status, body) = send(app, authed_get("/api/v1/users/username/ghost")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap(), json!({"error": "user not found"}));
}

#[tokio::test]
async fn malformed_id_and_uuid_are_bad_requests() {
    let app = router();

    let (status, body) = send(app.clone(), authed_get("/api/v1/users/id/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap(), json!({"error": "invalid id"}));

    let (status, body) = send(app, authed_get("/api/v1/users/uuid/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap(), json!({"error": "invalid uuid"}));
}

#[tokio::test]
async fn patch_updates_only_provided_fields() {
    let app = router();
    send(
        app.clone(),
        authed_json(
            "POST",
            "/api/v1/users/",
            json!({"username": "jdoe", "email": "jdoe@example.com", "full_name": "Jane Doe"}),
        ),
    )
    .await;

    let (status, body) = send(
        app,
        authed_json(
            "PATCH",
            "/api/v1/users/id/1",
            json!({"email": "jane@example.com"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["email"], "jane@example.com");
    assert_eq!(body["username"], "jdoe");
    assert_eq!(body["full_name"], "Jane Doe");
}

#[tokio::test]
async fn empty_patch_is_rejected() {
    let app = router();
    send(
        app.clone(),
        authed_json(
            "POST",
            "/api/v1/users/",
            json!({"username": "jdoe", "email": "jdoe@example.com", "full_name": "Jane Doe"}),
        ),
    )
    .await;

    let (status, body) = send(app, authed_json("PATCH", "/api/v1/users/id/1", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap(), json!({"error": "invalid user input"}));
}

#[tokio::test]
async fn patch_missing_user_is_not_found() {
    let app = router();

    let (status, body) = send(
        app,
        authed_json("PATCH", "/api/v1/users/id/42", json!({"email": "x@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap(), json!({"error": "user not found"}));
}

#[tokio::test]
async fn delete_removes_the_user() {
    let app = router();
    let (_, created) = send(
        app.clone(),
        authed_json(
            "POST",
            "/api/v1/users/",
            json!({"username": "jdoe", "email": "jdoe@example.com", "full_name": "Jane Doe"}),
        ),
    )
    .await;
    let uuid = created.unwrap()["uuid"].as_str().unwrap().to_string();

    let request = authed_json("DELETE", &format!("/api/v1/users/uuid/{uuid}"), json!({}));
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_none());

    let (status, _) = send(app.clone(), authed_get(&format!("/api/v1/users/uuid/{uuid}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A second delete reports not found.
    let request = authed_json("DELETE", &format!("/api/v1/users/uuid/{uuid}"), json!({}));
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap(), json!({"error": "user not found"}));
}

#[tokio::test]
async fn delete_by_id_works() {
    let app = router();
    send(
        app.clone(),
        authed_json(
            "POST",
            "/api/v1/users/",
            json!({"username": "jdoe", "email": "jdoe@example.com", "full_name": "Jane Doe"}),
        ),
    )
    .await;

    let (status, _) = send(app.clone(), authed_json("DELETE", "/api/v1/users/id/1", json!({}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(app, authed_get("/api/v1/users/")).await;
    assert_eq!(status, StatusCode::OK);
}
