use std::time::Instant;

use async_openai::types::chat::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::{BackendError, BackendResult};
use crate::config::Config;
use crate::constants::BACKEND_TEMPERATURE;

pub const PRIMARY_BASE_URL: &str = "https://api.openai.com/v1";
pub const ALTERNATE_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Host that expects attribution headers.
const ALTERNATE_HOST: &str = "openrouter.ai";

const ATTRIBUTION_TITLE: &str = "SourceHound Bot";

/// A chat-completion backend that answers with one JSON object.
#[async_trait]
pub trait LanguageBackend: Send + Sync {
    /// Sends a system + user prompt in forced-JSON mode and returns the raw
    /// message content. The content is untrusted; callers validate it.
    async fn complete_json(&self, system: &str, user: &str) -> BackendResult<String>;
}

/// Which credential selected the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendTarget {
    Primary,
    Alternate,
}

/// Resolved endpoint, model and headers for one backend.
#[derive(Clone, PartialEq, Eq)]
pub struct BackendSettings {
    pub target: BackendTarget,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// `HTTP-Referer` and `X-Title` values, when the endpoint wants them.
    pub attribution: Option<Attribution>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub referer: Option<String>,
    pub title: String,
}

impl std::fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendSettings")
            .field("target", &self.target)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("attribution", &self.attribution)
            .finish_non_exhaustive()
    }
}

impl BackendSettings {
    /// Resolves settings from whichever credential is present.
    ///
    /// The alternate credential wins when both are set. `OPENAI_BASE_URL`
    /// overrides the endpoint for either target; attribution headers follow the
    /// alternate target or an override pointing at the alternate host.
    pub fn from_config(config: &Config) -> Option<Self> {
        let (target, api_key) = match (&config.openrouter_api_key, &config.openai_api_key) {
            (Some(key), _) => (BackendTarget::Alternate, key.clone()),
            (None, Some(key)) => (BackendTarget::Primary, key.clone()),
            (None, None) => return None,
        };

        let base_url = match (&config.openai_base_url, target) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, BackendTarget::Alternate) => ALTERNATE_BASE_URL.to_string(),
            (None, BackendTarget::Primary) => PRIMARY_BASE_URL.to_string(),
        };

        let wants_attribution =
            target == BackendTarget::Alternate || base_url.contains(ALTERNATE_HOST);
        let attribution = wants_attribution.then(|| Attribution {
            referer: config.openrouter_referer.clone(),
            title: ATTRIBUTION_TITLE.to_string(),
        });

        let model = match target {
            BackendTarget::Alternate if !config.model.contains('/') => {
                format!("openai/{}", config.model)
            }
            _ => config.model.clone(),
        };

        Some(Self {
            target,
            api_key,
            base_url,
            model,
            attribution,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponseRaw {
    #[serde(default)]
    choices: Vec<ChoiceRaw>,
}

#[derive(Debug, Deserialize)]
struct ChoiceRaw {
    message: MessageRaw,
}

#[derive(Debug, Deserialize)]
struct MessageRaw {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible `/chat/completions` client.
#[derive(Clone)]
pub struct ChatCompletionsBackend {
    http_client: Client,
    settings: BackendSettings,
}

impl std::fmt::Debug for ChatCompletionsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsBackend")
            .field("settings", &self.settings)
            .finish()
    }
}

impl ChatCompletionsBackend {
    pub fn new(http_client: Client, settings: BackendSettings) -> Self {
        Self {
            http_client,
            settings,
        }
    }

    /// Returns `None` when no backend credential is configured.
    pub fn from_config(config: &Config, http_client: Client) -> Option<Self> {
        BackendSettings::from_config(config).map(|s| Self::new(http_client, s))
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    pub(crate) fn request_body(&self, system: &str, user: &str) -> BackendResult<serde_json::Value> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.settings.model)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system)
                    .build()
                    .map_err(|e| BackendError::Request(e.to_string()))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user)
                    .build()
                    .map_err(|e| BackendError::Request(e.to_string()))?
                    .into(),
            ])
            .temperature(BACKEND_TEMPERATURE)
            .build()
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let mut body =
            serde_json::to_value(&request).map_err(|e| BackendError::Request(e.to_string()))?;
        body["response_format"] = serde_json::json!({ "type": "json_object" });
        Ok(body)
    }
}

#[async_trait]
impl LanguageBackend for ChatCompletionsBackend {
    #[tracing::instrument(skip_all, fields(model = %self.settings.model))]
    async fn complete_json(&self, system: &str, user: &str) -> BackendResult<String> {
        let start = Instant::now();
        let body = self.request_body(system, user)?;

        let mut builder = self
            .http_client
            .post(format!("{}/chat/completions", self.settings.base_url))
            .bearer_auth(&self.settings.api_key)
            .json(&body);

        if let Some(ref attribution) = self.settings.attribution {
            if let Some(ref referer) = attribution.referer {
                builder = builder.header("HTTP-Referer", referer);
            }
            builder = builder.header("X-Title", &attribution.title);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "AI API request failed");
            BackendError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, "AI API error");
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        let content = raw
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(BackendError::EmptyResponse)?;

        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            chars = content.len(),
            "AI chat completion"
        );

        Ok(content)
    }
}
