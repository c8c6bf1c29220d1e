use crate::core::traits::ServiceError;
use anyhow::Context;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use di::ServiceProvider;
use di_axum::RouterServiceProviderExtensions;
use log::error;
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};

pub mod chat;

/// Errors surfaced by the handlers, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User not found")]
    UserNotFound,
    /// Any other failure, reported as 500 with the endpoint's message prefix.
    #[error("{context}: {detail}")]
    Internal {
        context: &'static str,
        detail: String,
    },
}

impl ApiError {
    pub fn internal(context: &'static str, detail: impl ToString) -> ApiError {
        ApiError::Internal {
            context,
            detail: detail.to_string(),
        }
    }

    /// Maps a service error, keeping "user not found" distinct from everything else.
    pub fn from_service(context: &'static str, error: ServiceError) -> ApiError {
        match error {
            ServiceError::UserNotFound => ApiError::UserNotFound,
            other => ApiError::internal(context, other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { .. } = &self {
            error!("{self}");
        }

        (
            self.status(),
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// All routes, wired to the services registered in `provider`.
pub fn app(provider: ServiceProvider, cors: Option<CorsLayer>) -> Router {
    let mut router = chat::router();
    if let Some(cors) = cors {
        router = router.layer(cors);
    }
    router.with_provider(provider)
}

/// CORS for the given origins, or `None` when no origin is configured.
pub fn cors_layer(origins: &[String]) -> anyhow::Result<Option<CorsLayer>> {
    if origins.is_empty() {
        return Ok(None);
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin {origin:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Some(
        CorsLayer::new()
            .allow_headers(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_origin(origins),
    ))
}
