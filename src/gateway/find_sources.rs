use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use tracing::info;

use super::auth::validate_init_data;
use super::error::GatewayError;
use super::state::AppState;
use crate::analysis::AnalysisResult;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindSourcesRequest {
    pub text: Option<String>,
    pub init_data: Option<String>,
}

/// Authenticated programmatic entry point: runs the pipeline without progress
/// notices and returns every verdict, ranked.
#[tracing::instrument(skip_all)]
pub async fn find_sources_handler(
    State(state): State<AppState>,
    payload: Result<Json<FindSourcesRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, GatewayError> {
    let bot_token = state
        .config
        .telegram_bot_token
        .as_deref()
        .ok_or(GatewayError::NotConfigured("Bot not configured"))?;
    let Json(request) = payload.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;

    let init_data = request
        .init_data
        .as_deref()
        .filter(|d| !d.is_empty())
        .ok_or(GatewayError::MissingInitData)?;
    validate_init_data(init_data, bot_token, state.config.auth_max_age)?;

    let text = request
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GatewayError::InvalidRequest("missing or invalid text".to_string()))?;

    let analysis = state.pipeline.discover_and_rank(text, None).await?;
    info!(verdicts = analysis.sources.len(), "Sources returned");

    Ok(Json(analysis))
}
