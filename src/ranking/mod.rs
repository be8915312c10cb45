//! Ordering and rendering of analysis results.
//!
//! Bands are presentational only; scores are never modified here.

pub mod bands;
pub mod format;
pub mod rank;

#[cfg(test)]
mod tests;

pub use bands::{RelevanceBand, confidence_mark};
pub use format::{HEADER, NO_SOURCES, format_condensed};
pub use rank::{rank, rank_result, top_n};
