//! HTTP-level tests for the folio-api router
//!
//! Each test builds the router over a fresh SQLite file and drives it with
//! `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use folio_api::{build_router, AppState};
use folio_common::db::{init::init_database, users};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

async fn setup() -> (TempDir, SqlitePool, Router) {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("folio.db")).await.unwrap();
    let app = build_router(AppState::new(pool.clone()));
    (dir, pool, app)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn titles(list: &Value, field: &str) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item[field].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Health and auth
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, _pool, app) = setup().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "folio-api");
    assert!(body["version"].is_string());
    assert!(body["uptimeSeconds"].is_u64());
}

#[tokio::test]
async fn test_login_success_and_failure() {
    let (_dir, pool, app) = setup().await;
    users::create_user(&pool, "admin", "s3cret").await.unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "username": "admin", "password": "s3cret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "admin");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "username": "admin", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Invalid credentials" }));

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "username": "nobody", "password": "s3cret" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_malformed_body() {
    let (_dir, _pool, app) = setup().await;

    let (status, body) = send(&app, "POST", "/api/auth/login", Some(json!({ "username": "admin" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request data");

    // No content type, not JSON
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .body(Body::from("username=admin"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_always_succeeds() {
    let (_dir, _pool, app) = setup().await;

    let (status, body) = send(&app, "POST", "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
}

#[tokio::test]
async fn test_change_credentials() {
    let (_dir, pool, app) = setup().await;
    users::create_user(&pool, "admin", "old-pass").await.unwrap();
    users::create_user(&pool, "other", "x").await.unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        "/api/admin/credentials",
        Some(json!({
            "username": "admin", "password": "bad",
            "newUsername": "owner", "newPassword": "new-pass"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/admin/credentials",
        Some(json!({
            "username": "admin", "password": "old-pass",
            "newUsername": "other", "newPassword": "new-pass"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already taken");

    let (status, _) = send(
        &app,
        "PUT",
        "/api/admin/credentials",
        Some(json!({
            "username": "admin", "password": "old-pass",
            "newUsername": " ", "newPassword": "new-pass"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/admin/credentials",
        Some(json!({
            "username": "admin", "password": "old-pass",
            "newUsername": "owner", "newPassword": "new-pass"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "owner");

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "username": "admin", "password": "old-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "username": "owner", "password": "new-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_profile_null_until_saved_then_upserted() {
    let (_dir, _pool, app) = setup().await;

    let (status, body) = send(&app, "GET", "/api/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    let (status, first) = send(
        &app,
        "PUT",
        "/api/profile",
        Some(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "555-0100",
            "githubUrl": "https://github.com/ada"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["githubUrl"], "https://github.com/ada");

    let (status, second) = send(
        &app,
        "PUT",
        "/api/profile",
        Some(json!({ "name": "Ada King", "email": "ada@example.com", "phone": "555-0100" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["id"], first["id"], "Profile is a single row");
    assert_eq!(second["name"], "Ada King");
    assert!(second["githubUrl"].is_null());

    let (_, fetched) = send(&app, "GET", "/api/profile", None).await;
    assert_eq!(fetched, second);
}

#[tokio::test]
async fn test_profile_requires_name_email_phone() {
    let (_dir, _pool, app) = setup().await;

    let (status, body) = send(&app, "PUT", "/api/profile", Some(json!({ "name": "Ada" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid profile data");
}

// ============================================================================
// Projects
// ============================================================================

#[tokio::test]
async fn test_project_crud() {
    let (_dir, _pool, app) = setup().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({
            "title": "Folio",
            "description": "Portfolio backend",
            "technologies": ["Rust", "SQLite"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["featured"], false);
    assert_eq!(created["order"], 0);
    assert_eq!(created["technologies"], json!(["Rust", "SQLite"]));
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/projects/{}", id),
        Some(json!({
            "title": "Folio 2",
            "description": "Rewritten",
            "featured": true,
            "order": 3
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["title"], "Folio 2");
    assert_eq!(updated["featured"], true);
    assert!(updated["technologies"].is_null());
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, body) = send(&app, "DELETE", &format!("/api/projects/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, list) = send(&app, "GET", "/api/projects", None).await;
    assert_eq!(list, json!([]));

    // Deleting again is still a success
    let (status, body) = send(&app, "DELETE", &format!("/api/projects/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_project_validation_and_missing_id() {
    let (_dir, _pool, app) = setup().await;

    let (status, body) = send(&app, "POST", "/api/projects", Some(json!({ "title": "No description" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid project data");

    let (status, _) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({ "title": "t", "description": "d", "order": "first" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/projects/does-not-exist",
        Some(json!({ "title": "t", "description": "d" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Project not found");
}

#[tokio::test]
async fn test_project_ordering_and_featured_first() {
    let (_dir, _pool, app) = setup().await;

    for (title, order, featured) in [("c", 2, true), ("a", 0, false), ("b", 1, true), ("d", 3, false)] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/projects",
            Some(json!({ "title": title, "description": "x", "order": order, "featured": featured })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, list) = send(&app, "GET", "/api/projects", None).await;
    assert_eq!(titles(&list, "title"), vec!["a", "b", "c", "d"]);

    let (_, list) = send(&app, "GET", "/api/projects?featuredFirst=true", None).await;
    assert_eq!(titles(&list, "title"), vec!["b", "c", "a", "d"]);

    let (status, _) = send(&app, "GET", "/api/projects?featuredFirst=maybe", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Skills and achievements
// ============================================================================

#[tokio::test]
async fn test_skill_crud_and_ordering() {
    let (_dir, _pool, app) = setup().await;

    let mut ids = Vec::new();
    for (name, category, order) in [("SQL", "database", 0), ("Rust", "programming", 1), ("Go", "programming", 0)] {
        let (status, skill) = send(
            &app,
            "POST",
            "/api/skills",
            Some(json!({ "name": name, "category": category, "order": order })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(skill["level"], 1);
        ids.push(skill["id"].as_str().unwrap().to_string());
    }

    let (_, list) = send(&app, "GET", "/api/skills", None).await;
    assert_eq!(titles(&list, "name"), vec!["SQL", "Go", "Rust"]);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/skills/{}", ids[1]),
        Some(json!({ "name": "Rust", "category": "programming", "level": 5, "iconUrl": "rust.svg" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["level"], 5);
    assert_eq!(updated["iconUrl"], "rust.svg");
    assert_eq!(updated["order"], 0);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/skills/missing",
        Some(json!({ "name": "x", "category": "tools" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Skill not found");

    let (status, _) = send(&app, "POST", "/api/skills", Some(json!({ "name": "No category" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", &format!("/api/skills/{}", ids[0]), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, list) = send(&app, "GET", "/api/skills", None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_achievement_crud_and_ordering() {
    let (_dir, _pool, app) = setup().await;

    let (status, undated) = send(
        &app,
        "POST",
        "/api/achievements",
        Some(json!({ "title": "Undated", "type": "award" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(undated["type"], "award");
    assert_eq!(undated["verified"], false);
    assert!(undated["achievedAt"].is_null());

    for (title, at) in [("Later", "2023-05-01"), ("Earlier", "2020-01-15T00:00:00Z")] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/achievements",
            Some(json!({ "title": title, "type": "certificate", "achievedAt": at, "verified": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, list) = send(&app, "GET", "/api/achievements", None).await;
    assert_eq!(titles(&list, "title"), vec!["Earlier", "Later", "Undated"]);

    let id = undated["id"].as_str().unwrap();
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/achievements/{}", id),
        Some(json!({ "title": "Dated now", "type": "competition", "achievedAt": "2019-12-31" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["type"], "competition");

    let (_, list) = send(&app, "GET", "/api/achievements", None).await;
    assert_eq!(titles(&list, "title"), vec!["Dated now", "Earlier", "Later"]);

    let (status, _) = send(
        &app,
        "POST",
        "/api/achievements",
        Some(json!({ "title": "No type" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", &format!("/api/achievements/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, list) = send(&app, "GET", "/api/achievements", None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

// ============================================================================
// Contacts and settings
// ============================================================================

#[tokio::test]
async fn test_contact_submission_without_relay() {
    let (_dir, _pool, app) = setup().await;

    let (status, contact) = send(
        &app,
        "POST",
        "/api/contact",
        Some(json!({
            "name": "Grace",
            "email": "grace@example.com",
            "subject": "Hello",
            "message": "Nice site"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(contact["replied"], false);
    let id = contact["id"].as_str().unwrap().to_string();

    let (_, list) = send(&app, "GET", "/api/contacts", None).await;
    assert_eq!(titles(&list, "subject"), vec!["Hello"]);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/contacts/{}", id),
        Some(json!({ "replied": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["replied"], true);

    let (status, _) = send(&app, "PUT", "/api/contacts/missing", Some(json!({ "replied": true }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/api/contacts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, list) = send(&app, "GET", "/api/contacts", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_contact_requires_all_fields() {
    let (_dir, _pool, app) = setup().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/contact",
        Some(json!({ "name": "Grace", "email": "grace@example.com", "message": "no subject" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid contact data");
}

#[tokio::test]
async fn test_settings_upsert_by_key() {
    let (_dir, _pool, app) = setup().await;

    let (_, list) = send(&app, "GET", "/api/admin/settings", None).await;
    assert_eq!(list, json!([]));

    let (status, first) = send(
        &app,
        "PUT",
        "/api/admin/settings",
        Some(json!({ "key": "theme", "value": "dark" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, second) = send(
        &app,
        "PUT",
        "/api/admin/settings",
        Some(json!({ "key": "theme", "value": "light" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["value"], "light");

    send(&app, "PUT", "/api/admin/settings", Some(json!({ "key": "accent", "value": "teal" }))).await;
    let (_, list) = send(&app, "GET", "/api/admin/settings", None).await;
    assert_eq!(titles(&list, "key"), vec!["accent", "theme"]);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/admin/settings",
        Some(json!({ "key": "  ", "value": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid settings data");
}

// ============================================================================
// Static site
// ============================================================================

#[tokio::test]
async fn test_static_site_with_index_fallback() {
    let (dir, pool, _) = setup().await;
    let site = dir.path().join("site");
    std::fs::create_dir_all(&site).unwrap();
    std::fs::write(site.join("index.html"), "<html>folio</html>").unwrap();
    std::fs::write(site.join("app.js"), "console.log('hi')").unwrap();

    let app = folio_api::build_app(AppState::new(pool), Some(&site));

    for (uri, expected) in [
        ("/app.js", "console.log('hi')"),
        ("/", "<html>folio</html>"),
        ("/admin", "<html>folio</html>"),
    ] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(std::str::from_utf8(&bytes).unwrap(), expected, "{}", uri);
    }

    // API routes still win over the static fallback
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    // Unknown API paths are JSON errors, never the front end
    for uri in ["/api/nope", "/api/nope/deeper"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body, json!({ "message": "Not found" }), "{}", uri);
    }
}

#[tokio::test]
async fn test_unknown_api_path_without_static_site() {
    let (_dir, _pool, app) = setup().await;

    let (status, body) = send(&app, "POST", "/api/unknown", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Not found" }));
}

// ============================================================================
// Storage failures
// ============================================================================

#[tokio::test]
async fn test_storage_failure_is_generic_500() {
    let (_dir, pool, app) = setup().await;
    sqlx::query("DROP TABLE projects").execute(&pool).await.unwrap();

    let (status, body) = send(&app, "GET", "/api/projects", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Failed to fetch projects" }));

    let (status, body) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({ "title": "Folio", "description": "d" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Failed to create project" }));
}
