//! Cross-cutting, shared constants.
//!
//! Caps here bound the cost of a single pipeline run. Prefer referencing these
//! over repeating literals so the driver, adapters and renderer stay in sync.

use std::time::Duration;

/// Candidates handed to the relevance analyzer, taken in arrival order.
pub const MAX_ANALYZED_CANDIDATES: usize = 5;

/// Minimum trimmed claim length (in characters) accepted by the driver.
pub const MIN_CLAIM_CHARS: usize = 10;

/// Hard ceiling applied by every adapter regardless of what the caller asks for.
pub const PROVIDER_RESULT_CEILING: usize = 20;

/// Results requested from the baseline provider per run.
pub const BASELINE_RESULTS: usize = 5;

/// Results requested from the selected secondary provider per run.
pub const SECONDARY_RESULTS: usize = 5;

/// Results requested per category in the four-category fan-out.
pub const CATEGORY_RESULTS: usize = 3;

/// Verdicts shown in the condensed, human-facing rendering.
pub const CONDENSED_TOP_N: usize = 3;

/// Matches shown per verdict in the condensed rendering.
pub const CONDENSED_MATCHES: usize = 3;

pub const HIGH_RELEVANCE_THRESHOLD: u8 = 70;
pub const MEDIUM_RELEVANCE_THRESHOLD: u8 = 40;

pub const MAX_RELEVANCE_SCORE: u8 = 100;

/// Sampling temperature for both backend calls.
pub const BACKEND_TEMPERATURE: f32 = 0.3;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS);

/// Freshness window for signed session tokens (24h).
pub const DEFAULT_AUTH_MAX_AGE_SECS: u64 = 24 * 60 * 60;

/// Upper bound on the length of a generated search query.
pub const MAX_QUERY_CHARS: usize = 200;

pub const USER_AGENT: &str = concat!(
    "SourceHound/",
    env!("CARGO_PKG_VERSION"),
    " (fact-checking bot)"
);

/// Request body ceiling for the chat webhook.
pub const WEBHOOK_BODY_LIMIT: usize = 1024 * 1024;

/// Request body ceiling for the programmatic endpoint.
pub const FIND_SOURCES_BODY_LIMIT: usize = 500 * 1024;
