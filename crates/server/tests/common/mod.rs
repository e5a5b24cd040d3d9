#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use database::db::create_connection;
use migration::{Migrator, MigratorTrait};
use serde_json::{Value, json};
use server::{app, config::Config, state::AppState};
use tower::ServiceExt;

pub async fn test_app() -> Router {
    let db = create_connection("sqlite::memory:", 1)
        .await
        .expect("failed to open sqlite database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");

    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_owned()),
        "JWT_SECRET" => Some("integration-test-secret".to_owned()),
        _ => None,
    })
    .expect("invalid test config");

    app(AppState::new(db, &config))
}

/// Sends one request through the router and decodes the body. Bodies that
/// are not JSON come back as a JSON string.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, value)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post(app: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

/// Registers a faculty member and returns their access token
pub async fn faculty_token(app: &Router, username: &str) -> String {
    let (status, body) = post(
        app,
        "/user/faculty/register",
        None,
        json!({
            "username": username,
            "password": "cobol",
            "first_name": "Grace",
            "last_name": "Hopper",
            "department": "Computer Science",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    body["token"]["access"].as_str().unwrap().to_owned()
}

/// Registers a student and returns their access token
pub async fn student_token(app: &Router, username: &str) -> String {
    let (status, body) = post(
        app,
        "/user/student/register",
        None,
        json!({ "username": username, "password": "engine" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    body["token"]["access"].as_str().unwrap().to_owned()
}

/// Creates a course and returns its code
pub async fn create_course(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = post(
        app,
        "/course/courses",
        Some(token),
        json!({
            "course_name": name,
            "description": format!("All about {name}"),
            "duration": 30,
            "difficulty_level": 1,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    body["course_code"].as_str().unwrap().to_owned()
}
