//! Top-level coordination of a claim-to-verdicts run.
//!
//! ```text
//! text ─► link resolution ─► length check ─► query formation
//!      ─► search (baseline + secondary) ─► truncate ─► analysis ─► rank
//! ```
//!
//! Each step feeds the next, so every network call is sequential except the
//! category fan-out inside the search step.

pub mod driver;
pub mod error;
pub mod link;


pub use crate::progress::{NoProgress, ProgressSink};
pub use driver::{
    MISSING_BACKEND, NOTICE_ANALYZING, NOTICE_FORMING_QUERY, NOTICE_LINK_UNRESOLVED,
    SourcePipeline,
};
pub use error::{PipelineError, PipelineResult};
#[cfg(any(test, feature = "mock"))]
pub use link::MockPostResolver;
pub use link::{PostLinkResolver, PostRef, TelegramPostResolver, find_post_link, parse_post_link};
