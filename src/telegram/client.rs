use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::error::{TransportError, TransportResult};
use super::types::{ApiReply, SendMessageRequest};

pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// Outbound side of a chat platform.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, chat_id: i64, text: &str) -> TransportResult<()>;
}

/// Bot API client. Messages go out as plain text.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    token: String,
    base_url: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    pub fn new(client: Client, token: impl Into<String>) -> Self {
        Self::with_base_url(client, token, DEFAULT_API_BASE_URL)
    }

    pub fn with_base_url(
        client: Client,
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    #[tracing::instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn send_message(&self, chat_id: i64, text: &str) -> TransportResult<()> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessageRequest {
                chat_id,
                text,
                disable_web_page_preview: true,
            })
            .send()
            .await
            .map_err(|e| TransportError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let reply: Option<ApiReply> = response.json().await.ok();

        match reply {
            Some(ApiReply { ok: true, .. }) if status.is_success() => {
                debug!("Message delivered");
                Ok(())
            }
            reply => {
                let description = reply
                    .and_then(|r| r.description)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
                warn!(status = %status, description = %description, "sendMessage failed");
                Err(TransportError::Api {
                    status: status.as_u16(),
                    description,
                })
            }
        }
    }
}
