//! End-to-end guard behavior over the HTTP surface
//!
//! Drives the router with in-process requests and checks that the three
//! guard outcomes map to the expected responses: redirect for anonymous
//! visitors, a blocking 403 for unauthorized users, and the handler output
//! otherwise.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mediboard_web::{create_app, AppState, WebConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn spawn_app(dir: &std::path::Path) -> axum::Router {
    let config = WebConfig {
        data_dir: Some(dir.to_string_lossy().to_string()),
        login_delay_ms: 0,
        ..WebConfig::default()
    };
    let state = AppState::new(config).await.unwrap();
    create_app(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn login_as(app: &axum::Router, email: &str) {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "email": email, "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn anonymous_visitors_are_redirected_to_login() {
    let dir = tempfile::tempdir().unwrap();
    let app = spawn_app(dir.path()).await;

    for uri in [
        "/api/patients",
        "/api/appointments",
        "/api/ehr",
        "/api/billing",
        "/api/inventory",
        "/api/settings",
        "/api/nav",
        "/api/auth/me",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::TEMPORARY_REDIRECT,
            "expected redirect for {}",
            uri
        );
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login",
            "wrong redirect target for {}",
            uri
        );
    }
}

#[tokio::test]
async fn public_endpoints_need_no_session() {
    let dir = tempfile::tempdir().unwrap();
    let app = spawn_app(dir.path()).await;

    for uri in ["/api/health", "/api/auth/status", "/api/auth/demo"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "failed for {}", uri);
    }
}

#[tokio::test]
async fn invalid_credentials_return_the_inline_message() {
    let dir = tempfile::tempdir().unwrap();
    let app = spawn_app(dir.path()).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "email": "nobody@hospital.com", "password": "pw" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid email or password");

    // An empty password fails for a known email as well
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "email": "admin@hospital.com", "password": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn nurse_gets_access_denied_for_settings_not_a_redirect() {
    let dir = tempfile::tempdir().unwrap();
    let app = spawn_app(dir.path()).await;

    login_as(&app, "nurse@hospital.com").await;

    let response = app.clone().oneshot(get("/api/settings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error"], "access_denied");
    assert_eq!(body["title"], "Access Denied");
}

#[tokio::test]
async fn administrator_reaches_every_guarded_module() {
    let dir = tempfile::tempdir().unwrap();
    let app = spawn_app(dir.path()).await;

    login_as(&app, "admin@hospital.com").await;

    for uri in [
        "/api/patients",
        "/api/appointments",
        "/api/ehr",
        "/api/billing",
        "/api/billing/summary",
        "/api/inventory",
        "/api/inventory/alerts",
        "/api/settings",
        "/api/nav",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "failed for {}", uri);
    }
}

#[tokio::test]
async fn logout_then_protected_route_redirects() {
    let dir = tempfile::tempdir().unwrap();
    let app = spawn_app(dir.path()).await;

    login_as(&app, "doctor@hospital.com").await;

    let response = app.clone().oneshot(get("/api/ehr")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json("/api/auth/logout", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/ehr")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn navigation_is_filtered_by_role() {
    let dir = tempfile::tempdir().unwrap();
    let app = spawn_app(dir.path()).await;

    login_as(&app, "lab@hospital.com").await;

    let response = app.clone().oneshot(get("/api/nav")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let labels: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Dashboard", "Lab Tests", "Help & Support"]);
}

#[tokio::test]
async fn module_crud_flows_through_the_guards() {
    let dir = tempfile::tempdir().unwrap();
    let app = spawn_app(dir.path()).await;

    login_as(&app, "receptionist@hospital.com").await;

    // Create a patient
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/patients",
            json!({
                "name": "Alice Carter",
                "age": 29,
                "gender": "Female",
                "phone": "+1 (555) 456-7890",
                "email": "alice.c@email.com",
                "blood_type": "AB+",
                "registered_date": "2024-02-01",
                "status": "active"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["id"], "P004");

    // The receptionist cannot see billing
    let response = app.clone().oneshot(get("/api/billing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Search finds the new patient
    let response = app
        .clone()
        .oneshot(get("/api/patients?search=alice"))
        .await
        .unwrap();
    let found = body_json(response).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn session_persists_across_application_restarts() {
    let dir = tempfile::tempdir().unwrap();

    {
        let app = spawn_app(dir.path()).await;
        login_as(&app, "billing@hospital.com").await;
    }

    // A fresh app over the same data directory rehydrates the session
    let app = spawn_app(dir.path()).await;
    let response = app.clone().oneshot(get("/api/auth/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "billing@hospital.com");
    assert_eq!(body["user"]["role"], "billing");
}
