//! Markwell Component Extraction
//!
//! Pure, deterministic extraction of rubric components from free-text
//! student writing. Extractors hold a compiled taxonomy and never fail:
//! empty or degenerate input yields an empty component set, and the same
//! input always yields the same output.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod analysis;
mod argument;
mod sentence;

pub use analysis::AnalysisExtractor;
pub use argument::ArgumentExtractor;
pub use sentence::split_sentences;
