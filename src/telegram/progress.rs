use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::client::ChatTransport;
use crate::progress::ProgressSink;

/// Delivers pipeline notices to one chat. Delivery failures are logged and
/// dropped so they never abort the run.
pub struct ChatProgress {
    transport: Arc<dyn ChatTransport>,
    chat_id: i64,
}

impl ChatProgress {
    pub fn new(transport: Arc<dyn ChatTransport>, chat_id: i64) -> Self {
        Self { transport, chat_id }
    }
}

#[async_trait]
impl ProgressSink for ChatProgress {
    async fn notify(&self, message: &str) {
        if let Err(e) = self.transport.send_message(self.chat_id, message).await {
            warn!(chat_id = self.chat_id, error = %e, "Progress notice not delivered");
        }
    }
}
