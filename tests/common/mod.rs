//! Shared helpers for the integration tests.

#![allow(dead_code)]

use anyhow::bail;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use mood_chat_api::api;
use mood_chat_api::build_provider;
use mood_chat_api::core::locks::UserLocks;
use mood_chat_api::infrastructure::database::DatabaseConnection;
use mood_chat_api::infrastructure::traits::SentimentClassifier;
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::time::Duration;
use tower::ServiceExt;

/// Deterministic stand-in for the hosted model, keyed off words in the text.
#[derive(Default)]
pub struct KeywordClassifier {
    pub delay: Option<Duration>,
}

#[async_trait]
impl SentimentClassifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> anyhow::Result<String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let text = text.to_lowercase();
        if text.contains("explode") {
            bail!("model crashed");
        }
        let label = if text.contains("love") || text.contains("great") {
            "POSITIVE"
        } else if text.contains("sad") || text.contains("hate") {
            "NEGATIVE"
        } else {
            "NEUTRAL"
        };
        Ok(label.to_owned())
    }
}

/// Single-connection in-memory database with migrations applied.
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    DatabaseConnection::from_pool(pool.clone())
        .migrate()
        .await
        .unwrap();
    pool
}

pub fn create_test_app(
    pool: &SqlitePool,
    classifier: KeywordClassifier,
    serialize: bool,
) -> axum::Router {
    let provider = build_provider(
        DatabaseConnection::from_pool(pool.clone()),
        classifier,
        UserLocks::new(serialize),
    )
    .unwrap();

    api::app(provider, None)
}

pub fn create_test_app_with_cors(pool: &SqlitePool, origins: &[&str]) -> axum::Router {
    let provider = build_provider(
        DatabaseConnection::from_pool(pool.clone()),
        KeywordClassifier::default(),
        UserLocks::new(false),
    )
    .unwrap();
    let origins: Vec<String> = origins.iter().map(|o| o.to_string()).collect();

    api::app(provider, api::cors_layer(&origins).unwrap())
}

pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(
    app: &axum::Router,
    uri: &str,
    body: impl Into<String>,
) -> (StatusCode, Value) {
    post_with_content_type(app, uri, "application/json", body).await
}

pub async fn post_with_content_type(
    app: &axum::Router,
    uri: &str,
    content_type: &str,
    body: impl Into<String>,
) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body.into()))
            .unwrap(),
    )
    .await
}

pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

/// `(conversation_history, goals)` straight from the table.
pub async fn stored_user(
    pool: &SqlitePool,
    username: &str,
) -> Option<(Option<String>, Option<String>)> {
    sqlx::query_as("SELECT conversation_history, goals FROM user WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
        .unwrap()
}
