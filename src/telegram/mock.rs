use std::sync::Mutex;

use async_trait::async_trait;

use super::client::ChatTransport;
use super::error::{TransportError, TransportResult};

/// Transport that records every outgoing message.
#[derive(Debug, Default)]
pub struct MockTransport {
    sent: Mutex<Vec<(i64, String)>>,
    fail: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails (after being recorded).
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send_message(&self, chat_id: i64, text: &str) -> TransportResult<()> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((chat_id, text.to_string()));
        }
        if self.fail {
            return Err(TransportError::Api {
                status: 403,
                description: "Forbidden: bot was blocked by the user".to_string(),
            });
        }
        Ok(())
    }
}
