use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::auth::AuthError;
use crate::pipeline::PipelineError;

pub const STATUS_HEADER: &str = "x-sourcehound-status";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("Missing or invalid initData")]
    MissingInitData,

    #[error("Invalid mini-app signature")]
    Unauthorized(#[from] AuthError),

    #[error("{0}")]
    NotConfigured(&'static str),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::MissingInitData | GatewayError::Unauthorized(_) => {
                (StatusCode::UNAUTHORIZED, "unauthorized")
            }
            GatewayError::NotConfigured(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "not_configured")
            }
            GatewayError::Pipeline(e) if e.is_user_correctable() => {
                (StatusCode::BAD_REQUEST, "user_error")
            }
            GatewayError::Pipeline(PipelineError::Provider(_) | PipelineError::Backend(_)) => {
                (StatusCode::BAD_GATEWAY, "upstream_error")
            }
            GatewayError::Pipeline(_) => (StatusCode::INTERNAL_SERVER_ERROR, "pipeline_error"),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, status_tag) = self.status();

        if status.is_server_error() {
            tracing::warn!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let mut headers = HeaderMap::new();
        headers.insert(STATUS_HEADER, HeaderValue::from_static(status_tag));

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
