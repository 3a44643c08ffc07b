#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use marketrev_core::types::DbId;
use sqlx::PgPool;
use tower::ServiceExt;

use marketrev_api::auth::identity::TrustedHeaderIdentity;
use marketrev_api::config::ServerConfig;
use marketrev_api::router::build_app_router;
use marketrev_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        db_max_connections: 5,
    }
}

/// Application state over `pool` with header-trusting identity.
pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        pool,
        identity: Arc::new(TrustedHeaderIdentity),
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(test_state(pool), &test_config())
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn options(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send `body` as JSON, with `X-User-Id` set when `user_id` is given.
pub async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    user_id: Option<DbId>,
    body: &serde_json::Value,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(id) = user_id {
        builder = builder.header("X-User-Id", id.to_string());
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    user_id: Option<DbId>,
    body: &serde_json::Value,
) -> Response {
    json_request(app, Method::POST, uri, user_id, body).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    user_id: Option<DbId>,
    body: &serde_json::Value,
) -> Response {
    json_request(app, Method::PUT, uri, user_id, body).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn seed_user(pool: &PgPool, username: &str, is_admin: bool) -> DbId {
    sqlx::query_scalar::<_, DbId>(
        "INSERT INTO users (email, username, is_admin) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(format!("{username}@example.com"))
    .bind(username)
    .bind(is_admin)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_marketplace(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar::<_, DbId>(
        "INSERT INTO marketplaces (name, icon) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(format!("{name}.svg"))
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn review_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Stored `(status, admin_comment)` of a review.
pub async fn review_state(pool: &PgPool, id: DbId) -> (String, Option<String>) {
    sqlx::query_as::<_, (String, Option<String>)>(
        "SELECT status, admin_comment FROM reviews WHERE id = $1",
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn set_status(pool: &PgPool, id: DbId, status: &str) {
    sqlx::query("UPDATE reviews SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
}
