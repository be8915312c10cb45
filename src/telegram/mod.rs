//! Chat transport: the Bot API client, inbound update types, progress
//! delivery and user-facing error text.

pub mod client;
pub mod error;
pub mod hints;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod progress;
pub mod types;


pub use client::{ChatTransport, DEFAULT_API_BASE_URL, TelegramClient};
pub use error::{TransportError, TransportResult};
pub use hints::{GENERIC_FAILURE, USAGE_HINT, remediation_hint, user_message};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use progress::ChatProgress;
pub use types::{Chat, Message, Update};
