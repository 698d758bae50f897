//! Router tests for `/api/v1/users`.

mod common;

use axum::http::{header, Method, StatusCode};
use common::TestApp;
use serde_json::{json, Value};

fn new_user(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "firstName": "John",
        "lastName": "Doe",
        "password": "password123"
    })
}

async fn create(app: &TestApp, username: &str, email: &str) -> String {
    let response = app.post("/api/v1/users", new_user(username, email)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_user_returns_201_with_location() {
    let app = TestApp::new();

    let response = app.post("/api/v1/users", new_user("jdoe", "jdoe@example.com")).await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["data"]["id"].as_str().unwrap();
    assert_eq!(
        response.headers[header::LOCATION],
        format!("/api/v1/users/{id}").as_str()
    );
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["role"], "USER");
    assert_eq!(response.body["data"]["isActive"], true);
    assert!(response.body["data"].get("password").is_none());
    assert!(response.body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_create_user_then_get_by_id_and_username() {
    let app = TestApp::new();
    let id = create(&app, "jdoe", "jdoe@example.com").await;

    let by_id = app.get(&format!("/api/v1/users/{id}")).await;
    assert_eq!(by_id.status, StatusCode::OK);
    assert_eq!(by_id.body["data"]["username"], "jdoe");
    assert_eq!(by_id.body["data"]["email"], "jdoe@example.com");
    assert_eq!(by_id.body["data"]["firstName"], "John");

    let by_username = app.get("/api/v1/users/username/jdoe").await;
    assert_eq!(by_username.status, StatusCode::OK);
    assert_eq!(by_username.body["data"]["id"], id.as_str());
}

#[tokio::test]
async fn test_create_user_with_invalid_body_lists_field_errors() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/v1/users",
            json!({
                "username": "x",
                "email": "not-an-email",
                "firstName": "John",
                "lastName": "Doe",
                "password": "short"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"]["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = response.body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"username"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = TestApp::new();
    let response = app
        .post("/api/v1/users", json!({"username": "jdoe"}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_duplicate_username_or_email_conflicts() {
    let app = TestApp::new();
    create(&app, "jdoe", "jdoe@example.com").await;

    let same_username = app.post("/api/v1/users", new_user("jdoe", "other@example.com")).await;
    assert_eq!(same_username.status, StatusCode::CONFLICT);
    assert_eq!(same_username.body["error"]["code"], "CONFLICT");

    let same_email = app.post("/api/v1/users", new_user("other", "jdoe@example.com")).await;
    assert_eq!(same_email.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_get_unknown_or_malformed_id() {
    let app = TestApp::new();

    let missing = app
        .get("/api/v1/users/0190a0c4-4b6e-7f6a-9a1d-2c3b4d5e6f70")
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"]["code"], "NOT_FOUND");

    let malformed = app.get("/api/v1/users/not-a-uuid").await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_user_changes_only_supplied_fields() {
    let app = TestApp::new();
    let id = create(&app, "jdoe", "jdoe@example.com").await;

    let response = app
        .put(
            &format!("/api/v1/users/{id}"),
            json!({"lastName": "Smith", "role": "ADMIN", "isActive": false}),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["lastName"], "Smith");
    assert_eq!(data["firstName"], "John");
    assert_eq!(data["email"], "jdoe@example.com");
    assert_eq!(data["role"], "ADMIN");
    assert_eq!(data["isActive"], false);
}

#[tokio::test]
async fn test_update_user_email_taken_by_another_user() {
    let app = TestApp::new();
    let id = create(&app, "jdoe", "jdoe@example.com").await;
    create(&app, "asmith", "asmith@example.com").await;

    let response = app
        .put(&format!("/api/v1/users/{id}"), json!({"email": "asmith@example.com"}))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_change_password_and_delete() {
    let app = TestApp::new();
    let id = create(&app, "jdoe", "jdoe@example.com").await;

    let changed = app
        .put(
            &format!("/api/v1/users/{id}/password"),
            json!({"newPassword": "another-secret"}),
        )
        .await;
    assert_eq!(changed.status, StatusCode::NO_CONTENT);

    let too_short = app
        .put(&format!("/api/v1/users/{id}/password"), json!({"newPassword": "short"}))
        .await;
    assert_eq!(too_short.status, StatusCode::BAD_REQUEST);

    let deleted = app.delete(&format!("/api/v1/users/{id}")).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.get(&format!("/api/v1/users/{id}")).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let deleted_again = app.delete(&format!("/api/v1/users/{id}")).await;
    assert_eq!(deleted_again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_users_pages_sorts_and_filters() {
    let app = TestApp::new();
    for name in ["carol", "alice", "bob"] {
        create(&app, name, &format!("{name}@example.com")).await;
    }
    let bob = app.get("/api/v1/users/username/bob").await;
    let bob_id = bob.body["data"]["id"].as_str().unwrap().to_string();
    app.put(&format!("/api/v1/users/{bob_id}"), json!({"role": "ADMIN"}))
        .await;

    let page = app.get("/api/v1/users?page=0&size=2&sort=username,asc").await;
    assert_eq!(page.status, StatusCode::OK);
    let data = &page.body["data"];
    assert_eq!(data["totalElements"], 3);
    assert_eq!(data["totalPages"], 2);
    assert_eq!(data["first"], true);
    assert_eq!(data["last"], false);
    let names: Vec<&str> = data["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alice", "bob"]);

    let admins = app.get("/api/v1/users?role=ADMIN").await;
    assert_eq!(admins.body["data"]["totalElements"], 1);
    assert_eq!(admins.body["data"]["content"][0]["username"], "bob");

    let inactive = app.get("/api/v1/users?isActive=false").await;
    assert_eq!(inactive.body["data"]["totalElements"], 0);
}

#[tokio::test]
async fn test_list_users_rejects_unknown_sort_property() {
    let app = TestApp::new();
    let response = app.get("/api/v1/users?sort=passwordHash").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_method_not_allowed() {
    let app = TestApp::new();
    let response = app.request(Method::PATCH, "/api/v1/users", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}
