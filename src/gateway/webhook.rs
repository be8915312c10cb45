use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use tracing::{info, warn};

use super::error::GatewayError;
use super::state::AppState;
use crate::ranking::format_condensed;
use crate::telegram::{ChatProgress, USAGE_HINT, Update, user_message};

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl WebhookAck {
    fn ok() -> Self {
        Self {
            ok: true,
            message: None,
        }
    }
}

#[tracing::instrument]
pub async fn webhook_info_handler() -> Json<WebhookAck> {
    Json(WebhookAck {
        ok: true,
        message: Some("Telegram webhook. Send POST here."),
    })
}

/// Handles one chat update to completion, then acknowledges it.
///
/// Run failures are reported to the chat, not to the platform: the reply is
/// `200 {ok:true}` either way so the update is not redelivered.
#[tracing::instrument(skip_all)]
pub async fn webhook_handler(
    State(state): State<AppState>,
    payload: Result<Json<Update>, JsonRejection>,
) -> Result<Json<WebhookAck>, GatewayError> {
    let transport = state
        .transport
        .clone()
        .ok_or(GatewayError::NotConfigured("Bot token not configured"))?;
    let Json(update) = payload.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;

    let Some(message) = update.message() else {
        return Ok(Json(WebhookAck::ok()));
    };
    let chat_id = message.chat.id;
    let text = message.text.as_deref().map(str::trim).unwrap_or_default();

    info!(
        update_id = update.update_id,
        chat_id,
        chars = text.chars().count(),
        "Update received"
    );

    let reply = if text.is_empty() {
        USAGE_HINT.to_string()
    } else {
        let progress = ChatProgress::new(transport.clone(), chat_id);
        match state.pipeline.discover_and_rank(text, Some(&progress)).await {
            Ok(analysis) => format_condensed(&analysis),
            Err(e) => {
                warn!(chat_id, error = %e, "Run failed");
                user_message(&e)
            }
        }
    };

    if let Err(e) = transport.send_message(chat_id, &reply).await {
        warn!(chat_id, error = %e, "Reply not delivered");
    }

    Ok(Json(WebhookAck::ok()))
}
