//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates.

use crate::rubric::Rubric;
use std::collections::BTreeMap;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (markwell-llm).
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for the grammar-error battery
///
/// The default pattern batteries are tuned to observed student mistakes and
/// are expected to be incomplete; this seam makes them replaceable without
/// touching the cohesion scorer.
pub trait GrammarCheck {
    /// Count grammar errors in the text, returning the count and a list of
    /// human-readable issue descriptions
    fn count_errors(&self, text: &str) -> (usize, Vec<String>);
}

/// Request handed to an external scorer
///
/// Carries the raw text, the rubric in force, and a condensed summary of the
/// rule-based extraction for the scorer to anchor on.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalScoreRequest {
    /// Raw student text
    pub text: String,

    /// Rubric the document is graded against
    pub rubric: Rubric,

    /// Condensed rule-based extraction summary
    pub extraction_summary: String,
}

/// Scores returned by an external scorer, before re-clamping
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalScore {
    /// Presence sub-metric
    pub sm1: f64,

    /// Ceiling reported by the scorer
    pub ceiling: f64,

    /// Depth sub-metric (re-clamped by the engine)
    pub sm2: f64,

    /// Cohesion sub-metric (re-clamped by the engine)
    pub sm3: f64,

    /// Detail quality label reported by the scorer, when present
    pub detail_quality: Option<String>,

    /// Extra response fields, passed through to feedback untouched
    pub feedback_fields: BTreeMap<String, String>,
}

/// Outcome of one external scoring attempt
///
/// The fallback policy is explicit: the engine branches on this tag instead
/// of catching errors. A failed call is a normal `Unavailable` value.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalOutcome {
    /// The external service produced usable scores
    Scored(ExternalScore),

    /// The external service could not be used; fall back to the
    /// rule-based path
    Unavailable {
        /// Why the external path was unusable (network, auth, malformed
        /// response)
        reason: String,
    },
}

impl ExternalOutcome {
    /// Convenience constructor for the unavailable case
    pub fn unavailable(reason: impl Into<String>) -> Self {
        ExternalOutcome::Unavailable {
            reason: reason.into(),
        }
    }
}

/// Trait for the optional external scoring step
///
/// Implementations make a single blocking attempt with no internal retry;
/// every failure mode maps to `ExternalOutcome::Unavailable`.
pub trait ExternalScorer {
    /// Score the request, or report that the external path is unavailable
    fn score(&self, request: &ExternalScoreRequest) -> ExternalOutcome;
}
