//! Quality labels produced by the extraction decision trees

use serde::{Deserialize, Serialize};

/// Quality label for Detail/Evidence in analytical writing
///
/// Produced by a decision tree over quoted spans, attribution, and contextual
/// dimensions; the associated score keys the presence sub-metric's ceiling
/// lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailQuality {
    /// No evidence at all
    Missing,
    /// General descriptions that cannot be located in the text
    Vague,
    /// Quoted or concretely visualizable evidence
    Specific,
    /// Quoted, attributed evidence with contextual dimensions
    Precise,
}

impl DetailQuality {
    /// Label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailQuality::Missing => "missing",
            DetailQuality::Vague => "vague",
            DetailQuality::Specific => "specific",
            DetailQuality::Precise => "precise",
        }
    }

    /// Parse a label (used when validating external scorer output)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "missing" => Some(DetailQuality::Missing),
            "vague" => Some(DetailQuality::Vague),
            "specific" => Some(DetailQuality::Specific),
            "precise" => Some(DetailQuality::Precise),
            _ => None,
        }
    }
}

/// Quality label for Evidence in argumentative writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceQuality {
    /// No evidence present
    Missing,
    /// Bare assertion restating the claim
    Assertion,
    /// Vague references to the text as a whole
    General,
    /// Scene references without exact wording
    Paraphrased,
    /// Direct quotes or multiple located scenes
    Specific,
}

impl EvidenceQuality {
    /// Label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceQuality::Missing => "missing",
            EvidenceQuality::Assertion => "assertion",
            EvidenceQuality::General => "general",
            EvidenceQuality::Paraphrased => "paraphrased",
            EvidenceQuality::Specific => "specific",
        }
    }
}

/// Strength of the stance taken in argumentative writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionStrength {
    /// No stance markers found
    Missing,
    /// maybe, perhaps, sort of
    Hedged,
    /// "is more of a", "rather than"
    Implicit,
    /// I think, in my opinion
    Moderate,
    /// I believe, it is clear that
    Strong,
}

impl PositionStrength {
    /// Label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionStrength::Missing => "missing",
            PositionStrength::Hedged => "hedged",
            PositionStrength::Implicit => "implicit",
            PositionStrength::Moderate => "moderate",
            PositionStrength::Strong => "strong",
        }
    }
}
