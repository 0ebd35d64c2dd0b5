use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use macabre::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

/// Seeded admin credentials (must match the seed migration)
const ADMIN_EMAIL: &str = "admin@macabre.local";
const ADMIN_PASSWORD: &str = "password";

async fn spawn_state() -> Arc<macabre::api::AppState> {
    let mut config = Config::default();
    config.general.database_url = "sqlite::memory:".to_string();
    // A single pooled connection keeps the in-memory database alive.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    macabre::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state")
}

async fn spawn_app() -> Router {
    macabre::api::router(spawn_state().await).await
}

fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("X-Session-Token", token);
    }

    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn register(app: &Router, email: &str, username: &str) -> (String, i64) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(serde_json::json!({
                "email": email,
                "password": "dread-and-gloom",
                "username": username,
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    let id = body["user"]["id"].as_i64().unwrap();
    (token, id)
}

async fn login(app: &Router, email: &str, password: &str) -> axum::response::Response {
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        ))
        .await
        .unwrap()
}

async fn admin_token(app: &Router) -> String {
    let response = login(app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    read_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_register_and_duplicate_email() {
    let app = spawn_app().await;

    let (_, _) = register(&app, "reader@example.com", "reader").await;

    // same email again
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(serde_json::json!({
                "email": "reader@example.com",
                "password": "another-pass",
                "username": "reader2",
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = read_json(response).await;
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(serde_json::json!({ "email": "no-pass@example.com" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(
        body["required"],
        serde_json::json!(["email", "password", "username"])
    );
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let app = spawn_app().await;

    register(&app, "victim@example.com", "victim").await;

    let response = login(&app, "victim@example.com", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_disabled_account_forbidden() {
    let app = spawn_app().await;

    let (_, user_id) = register(&app, "banned@example.com", "banned").await;
    let admin = admin_token(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/admin/users",
            Some(&admin),
            Some(serde_json::json!({ "userId": user_id, "isActive": false })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["user"]["isActive"], false);

    let response = login(&app, "banned@example.com", "dread-and-gloom").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Account is disabled");
}

#[tokio::test]
async fn test_session_resolves_profile() {
    let app = spawn_app().await;

    let (token, _) = register(&app, "ghost@example.com", "ghostwriter").await;

    // no token
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/profile", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // valid token
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/profile", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["user"]["username"], "ghostwriter");
    assert_eq!(body["stats"]["storiesCount"], 0);
    assert_eq!(body["stats"]["commentsCount"], 0);

    // garbage token
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/profile", Some("bogus"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_session_unauthorized() {
    let state = spawn_state().await;
    let app = macabre::api::router(state.clone()).await;

    let (_, user_id) = register(&app, "late@example.com", "latecomer").await;

    // a session whose TTL is already in the past
    let (expired_token, _) = state
        .store()
        .create_session(i32::try_from(user_id).unwrap(), -1)
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/profile",
            Some(&expired_token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Invalid or expired session");
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = spawn_app().await;

    let (token, _) = register(&app, "leaver@example.com", "leaver").await;

    let response = app
        .clone()
        .oneshot(json_request("DELETE", "/api/auth/session", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // the token no longer resolves
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/profile", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // logging out again still succeeds
    let response = app
        .clone()
        .oneshot(json_request("DELETE", "/api/auth/session", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Logged out");
}

#[tokio::test]
async fn test_profile_update_patch() {
    let app = spawn_app().await;

    let (token, _) = register(&app, "editor@example.com", "editor").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/profile",
            Some(&token),
            Some(serde_json::json!({ "bio": "Night-shift horror writer" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["user"]["bio"], "Night-shift horror writer");
    // untouched field survives
    assert_eq!(body["user"]["fullName"], "editor");

    // empty patch is a validation error
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/profile",
            Some(&token),
            Some(serde_json::json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "No fields to update");
}

#[tokio::test]
async fn test_admin_surface_requires_role() {
    let app = spawn_app().await;

    let (token, _) = register(&app, "pleb@example.com", "pleb").await;

    for uri in ["/api/admin/stats", "/api/admin/users", "/api/admin/stories"] {
        let response = app
            .clone()
            .oneshot(json_request("GET", uri, Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "GET {uri}");
        let body = read_json(response).await;
        assert_eq!(body["error"], "Admin access required");
    }

    // non-admin PUT on the admin resource is rejected, not treated as
    // a self-update
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/admin/users",
            Some(&token),
            Some(serde_json::json!({ "userId": 1, "role": "admin" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_stats_and_users() {
    let app = spawn_app().await;

    register(&app, "one@example.com", "one").await;
    register(&app, "two@example.com", "two").await;
    let admin = admin_token(&app).await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/admin/stats", Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    // two registered plus the seeded admin
    assert_eq!(body["stats"]["totalUsers"], 3);
    assert_eq!(body["stats"]["newUsersWeek"], 3);
    assert_eq!(body["stats"]["totalStories"], 0);

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/admin/users?limit=2&offset=0",
            Some(&admin),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_admin_update_requires_user_id() {
    let app = spawn_app().await;
    let admin = admin_token(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/admin/users",
            Some(&admin),
            Some(serde_json::json!({ "isActive": false })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "userId required");
}

#[tokio::test]
async fn test_admin_promote_role() {
    let app = spawn_app().await;

    let (_, user_id) = register(&app, "mod@example.com", "moderator").await;
    let admin = admin_token(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/admin/users",
            Some(&admin),
            Some(serde_json::json!({ "userId": user_id, "role": "admin" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["user"]["role"], "admin");

    // the promoted account can now read admin stats
    let response = login(&app, "mod@example.com", "dread-and-gloom").await;
    let token = read_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/admin/stats", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // unknown roles are rejected
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/admin/users",
            Some(&admin),
            Some(serde_json::json!({ "userId": user_id, "role": "owner" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_method_not_allowed() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request("DELETE", "/api/authors", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn test_unknown_route_not_found() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/unknown", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
