//! HTTP gateway (Axum): chat webhook and the authenticated programmatic
//! endpoint, both backed by one shared [`SourcePipeline`].
//!
//! [`SourcePipeline`]: crate::pipeline::SourcePipeline

pub mod auth;
pub mod error;
pub mod find_sources;
pub mod state;
pub mod webhook;


use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::constants::{FIND_SOURCES_BODY_LIMIT, WEBHOOK_BODY_LIMIT};

pub use auth::{AuthError, validate_init_data};
pub use error::{ErrorResponse, GatewayError, STATUS_HEADER};
pub use find_sources::{FindSourcesRequest, find_sources_handler};
pub use state::AppState;
pub use webhook::{WebhookAck, webhook_handler, webhook_info_handler};

pub fn create_router_with_state(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/healthz", get(health_handler))
        .route(
            "/api/telegram",
            get(webhook_info_handler)
                .post(webhook_handler)
                .layer(DefaultBodyLimit::max(WEBHOOK_BODY_LIMIT)),
        )
        .route(
            "/api/find-sources",
            post(find_sources_handler).layer(DefaultBodyLimit::max(FIND_SOURCES_BODY_LIMIT)),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static("healthy"));

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}
