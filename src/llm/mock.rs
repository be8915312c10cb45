use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::client::LanguageBackend;
use super::error::{BackendError, BackendResult};

/// Backend that replays scripted replies in order and records every prompt.
///
/// Once the script runs dry every further call fails with
/// [`BackendError::EmptyResponse`].
#[derive(Debug, Default)]
pub struct MockBackend {
    replies: Mutex<VecDeque<BackendResult<String>>>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues successful replies.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let backend = Self::new();
        for reply in replies {
            backend.push_reply(reply);
        }
        backend
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Ok(reply.into()));
        }
    }

    pub fn push_error(&self, error: BackendError) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Err(error));
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// `(system, user)` pairs in call order.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LanguageBackend for MockBackend {
    async fn complete_json(&self, system: &str, user: &str) -> BackendResult<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push((system.to_string(), user.to_string()));
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .unwrap_or(Err(BackendError::EmptyResponse))
    }
}
