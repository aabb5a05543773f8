//! Rubric selection and document metadata

use serde::{Deserialize, Serialize};

/// Which rubric a document is graded against
///
/// Both rubrics share one architecture: taxonomy tables, component
/// extraction, ceiling-constrained scoring, feedback synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rubric {
    /// Literary-analytical writing: Topic/Verb/Object/Detail/Effect
    Analysis,
    /// Argumentative writing: Position/Evidence/Reasoning/Counter/Synthesis
    Argument,
}

impl Rubric {
    /// Rubric name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rubric::Analysis => "analysis",
            Rubric::Argument => "argument",
        }
    }

    /// Parse a rubric from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "analysis" => Some(Rubric::Analysis),
            "argument" => Some(Rubric::Argument),
            _ => None,
        }
    }
}

impl std::str::FromStr for Rubric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid rubric: {}", s))
    }
}

/// Optional metadata accompanying a document
///
/// The engine accepts plain text plus this structure; wrapping formats are a
/// boundary adapter's concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Student year level, when known
    pub year_level: Option<u8>,

    /// Caller-supplied document identifier
    pub source_id: Option<String>,
}
