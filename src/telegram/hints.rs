//! User-facing error text for chat replies.

use crate::llm::BackendError;
use crate::pipeline::PipelineError;
use crate::search::{brave, google, search1api, wikipedia};

pub const USAGE_HINT: &str =
    "📝 Send a text message (at least 10 characters) and I will look for its sources.";

pub const GENERIC_FAILURE: &str =
    "❌ Something went wrong while searching or analyzing sources. Please try again later.";

/// The message shown to a chat user when a run fails: the error itself when
/// the user can act on it, a generic apology otherwise, plus a remediation
/// hint when one applies.
pub fn user_message(err: &PipelineError) -> String {
    let mut message = if err.is_user_correctable() {
        format!("❌ {err}")
    } else {
        GENERIC_FAILURE.to_string()
    };
    if let Some(hint) = remediation_hint(err) {
        message.push_str("\n\n💡 ");
        message.push_str(hint);
    }
    message
}

/// Points the operator at the setting most likely behind `err`.
pub fn remediation_hint(err: &PipelineError) -> Option<&'static str> {
    match err {
        PipelineError::Provider(e) => Some(match e.provider() {
            search1api::PROVIDER_NAME => "Search (Search1API): check SEARCH1API_KEY.",
            google::PROVIDER_NAME => {
                "Search (Google): check GOOGLE_SEARCH_API_KEY and GOOGLE_SEARCH_ENGINE_ID."
            }
            brave::PROVIDER_NAME => "Search (Brave): check BRAVE_API_KEY.",
            wikipedia::PROVIDER_NAME => {
                "Search (Wikipedia): network error or Wikipedia is unavailable."
            }
            _ => "Search: the provider is unavailable.",
        }),
        PipelineError::Configuration(_) => {
            Some("AI (OpenRouter/OpenAI): set OPENROUTER_API_KEY or OPENAI_API_KEY.")
        }
        PipelineError::Backend(BackendError::Api { status, .. }) if matches!(status, 401 | 403) => {
            Some("AI (OpenRouter/OpenAI): check OPENROUTER_API_KEY or OPENAI_API_KEY.")
        }
        PipelineError::Backend(BackendError::Api { status: 429, .. }) => {
            Some("AI (OpenRouter/OpenAI): rate limit or quota reached.")
        }
        _ => None,
    }
}
