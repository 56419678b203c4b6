//! Shared helpers for database-backed tests
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p stockroom-server -- --ignored

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use stockroom_server::db::migrations;
use stockroom_server::{build_router, create_pool, AppState, ServerConfig};
use tower::ServiceExt;
use uuid::Uuid;

/// Pool on `DATABASE_URL` with migrations applied.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    pool
}

pub fn app(pool: &PgPool) -> Router {
    build_router(AppState::new(pool.clone()), &ServerConfig::default())
}

/// Name that cannot collide with other tests sharing the database.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Send a request and return status plus parsed JSON body (Null when empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn create_item(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/items/create",
        Some(serde_json::json!({"name": name, "description": "test item"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

pub async fn create_store(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/stores/create",
        Some(serde_json::json!({
            "name": name,
            "description": "test store",
            "address": "1 Test Street"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}
