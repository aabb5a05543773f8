//! Markwell Ceiling-Constrained Scoring
//!
//! Turns extracted components into the three sub-metric scores. The presence
//! sub-metric fixes a ceiling through a fixed lookup table; depth and
//! cohesion can never exceed it, so fluent writing with shallow evidence
//! stays capped. Scoring never fails: empty input lands on the lookup-table
//! floors.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod analysis;
mod argument;
mod grammar;

pub use analysis::score_analysis;
pub use argument::score_argument;
pub use grammar::{ArgumentGrammar, PatternGrammar};

use markwell_domain::ScoreResult;

/// Scores produced by the deterministic rule-based path
#[derive(Debug, Clone, PartialEq)]
pub struct RuleScores {
    /// The combined, ceiling-clamped score
    pub result: ScoreResult,
    /// Quality-adjusted insight count (analysis) or distinct reasoning
    /// chains (argument) behind the depth score
    pub distinct_insights: f64,
    /// Grammar errors counted by the battery
    pub grammar_error_count: usize,
    /// Human-readable grammar issue descriptions
    pub grammar_issues: Vec<String>,
}
