//! Chat-completion client for the relevance model.
//!
//! [`LanguageBackend`] is the seam the analysis step depends on;
//! [`ChatCompletionsBackend`] speaks the OpenAI-compatible wire format to
//! either the primary endpoint or the alternate router.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::{
    ALTERNATE_BASE_URL, Attribution, BackendSettings, BackendTarget, ChatCompletionsBackend,
    LanguageBackend, PRIMARY_BASE_URL,
};
pub use error::{BackendError, BackendResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockBackend;
