//! Serializable evaluation output

use markwell_domain::{
    ArgumentComponents, DocumentMeta, ExtractedComponents, Feedback, Rubric, ScoreResult,
};
use serde::Serialize;

/// Which scoring path produced the final scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOrigin {
    /// Deterministic rule-based scoring
    Rule,
    /// External scorer, re-clamped by the engine
    External,
}

/// Condensed component view included in the evaluation output
///
/// The full component structures stay internal; callers get the counts and
/// labels a report needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComponentSummary {
    /// Analysis-rubric summary
    Analysis {
        /// Topics under analysis
        topics: Vec<String>,
        /// Analytical verbs found
        verbs: Vec<String>,
        /// Objects of the analysis
        objects: Vec<String>,
        /// Number of textual details captured
        detail_count: usize,
        /// Number of effect sentences captured
        effect_count: usize,
        /// Detail quality label
        detail_quality: String,
    },
    /// Argument-rubric summary
    Argument {
        /// Position term taken, when one was found
        position: Option<String>,
        /// Stance strength label
        position_strength: String,
        /// Number of evidence items
        evidence_count: usize,
        /// Reasoning sophistication layer (0-4)
        reasoning_layer: u8,
        /// Layer label
        reasoning_label: String,
        /// Number of counter-argument sentences
        counter_count: usize,
        /// Whether a concluding synthesis was found
        has_synthesis: bool,
    },
}

impl ComponentSummary {
    /// Summarize analysis components
    pub fn from_analysis(components: &ExtractedComponents) -> Self {
        ComponentSummary::Analysis {
            topics: components.topics.clone(),
            verbs: components.verbs.clone(),
            objects: components.objects.clone(),
            detail_count: components.details.len(),
            effect_count: components.effects.len(),
            detail_quality: components.detail_quality.as_str().to_string(),
        }
    }

    /// Summarize argument components
    pub fn from_argument(components: &ArgumentComponents) -> Self {
        ComponentSummary::Argument {
            position: components.position.clone(),
            position_strength: components.position_strength.as_str().to_string(),
            evidence_count: components.evidence_items.len(),
            reasoning_layer: components.reasoning_layer.level(),
            reasoning_label: components.reasoning_layer.label().to_string(),
            counter_count: components.counter_arguments.len(),
            has_synthesis: components.synthesis.is_some(),
        }
    }
}

/// Options for one evaluation call
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    /// Rubric to grade against
    pub rubric: Rubric,
    /// Optional document metadata, echoed into the output
    pub meta: DocumentMeta,
}

impl EvaluateOptions {
    /// Grade against the analysis rubric
    pub fn analysis() -> Self {
        Self {
            rubric: Rubric::Analysis,
            meta: DocumentMeta::default(),
        }
    }

    /// Grade against the argument rubric
    pub fn argument() -> Self {
        Self {
            rubric: Rubric::Argument,
            meta: DocumentMeta::default(),
        }
    }

    /// Attach document metadata
    pub fn with_meta(mut self, meta: DocumentMeta) -> Self {
        self.meta = meta;
        self
    }
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self::analysis()
    }
}

/// The complete result of grading one document
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// Unique evaluation id (UUIDv7, chronologically sortable)
    pub id: String,

    /// Rubric the document was graded against
    pub rubric: Rubric,

    /// Which scoring path produced the scores
    pub origin: ScoreOrigin,

    /// Reason the external path was skipped, when it was attempted and fell
    /// back to rule-based scoring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,

    /// Sub-metric scores with the ceiling invariant enforced
    pub scores: ScoreResult,

    /// Condensed component view
    pub components: ComponentSummary,

    /// Per-sub-metric feedback text
    pub feedback: Feedback,

    /// Caller-supplied document metadata
    pub meta: DocumentMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use markwell_domain::{DetailQuality, ReasoningLayer};

    #[test]
    fn test_analysis_summary_counts() {
        let mut c = ExtractedComponents::empty();
        c.topics = vec!["narrator".to_string()];
        c.details = vec!["a".to_string(), "b".to_string()];
        c.detail_quality = DetailQuality::Specific;

        match ComponentSummary::from_analysis(&c) {
            ComponentSummary::Analysis {
                topics,
                detail_count,
                detail_quality,
                ..
            } => {
                assert_eq!(topics, vec!["narrator".to_string()]);
                assert_eq!(detail_count, 2);
                assert_eq!(detail_quality, "specific");
            }
            ComponentSummary::Argument { .. } => panic!("expected analysis summary"),
        }
    }

    #[test]
    fn test_argument_summary_layer() {
        let mut c = ArgumentComponents::empty();
        c.position = Some("hero".to_string());
        c.reasoning_layer = ReasoningLayer::CausalChain;

        match ComponentSummary::from_argument(&c) {
            ComponentSummary::Argument {
                position,
                reasoning_layer,
                has_synthesis,
                ..
            } => {
                assert_eq!(position.as_deref(), Some("hero"));
                assert_eq!(reasoning_layer, 3);
                assert!(!has_synthesis);
            }
            ComponentSummary::Analysis { .. } => panic!("expected argument summary"),
        }
    }

    #[test]
    fn test_evaluation_serializes() {
        let evaluation = Evaluation {
            id: "0190e4a0-0000-7000-8000-000000000000".to_string(),
            rubric: Rubric::Analysis,
            origin: ScoreOrigin::Rule,
            fallback_reason: None,
            scores: ScoreResult::new(3.0, 3.0, 2.5, 2.5),
            components: ComponentSummary::from_analysis(&ExtractedComponents::empty()),
            feedback: Feedback::new(),
            meta: DocumentMeta::default(),
        };

        let json = serde_json::to_value(&evaluation).unwrap();
        assert_eq!(json["rubric"], "analysis");
        assert_eq!(json["origin"], "rule");
        assert!(json.get("fallback_reason").is_none());
        assert!(json["scores"]["ceiling"].is_number());
    }
}
