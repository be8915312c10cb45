//! Progress notifications emitted at pipeline step boundaries.
//!
//! The driver awaits each notification in order and ignores the outcome.
//! Whoever implements [`ProgressSink`] owns delivery (and its failures).

use async_trait::async_trait;

#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn notify(&self, message: &str);
}

/// Sink that drops every notice. Used by callers that supply no sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

#[async_trait]
impl ProgressSink for NoProgress {
    async fn notify(&self, _message: &str) {}
}

#[cfg(any(test, feature = "mock"))]
pub use recording::RecordingProgress;

#[cfg(any(test, feature = "mock"))]
mod recording {
    use super::ProgressSink;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Sink that keeps every notice for later assertions.
    #[derive(Debug, Default)]
    pub struct RecordingProgress {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingProgress {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn messages(&self) -> Vec<String> {
            self.messages
                .lock()
                .map(|m| m.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl ProgressSink for RecordingProgress {
        async fn notify(&self, message: &str) {
            if let Ok(mut messages) = self.messages.lock() {
                messages.push(message.to_string());
            }
        }
    }
}
