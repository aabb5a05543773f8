//! Extracted component model for argumentative writing
//!
//! Parallel to the analysis-side `ExtractedComponents`, with the same
//! immutability and deduplication guarantees.

use crate::quality::{EvidenceQuality, PositionStrength};
use crate::tier::ReasoningLayer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification of a piece of supporting evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    /// Direct quotes and located scene references
    SpecificTextual,
    /// Retold scenes without exact wording
    Paraphrased,
    /// References to the text as a whole
    GeneralReference,
    /// Restates the claim as its own support
    AssertionOnly,
}

impl EvidenceKind {
    /// Kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceKind::SpecificTextual => "specific_textual",
            EvidenceKind::Paraphrased => "paraphrased",
            EvidenceKind::GeneralReference => "general_reference",
            EvidenceKind::AssertionOnly => "assertion_only",
        }
    }
}

/// Classification of a reasoning move
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningKind {
    /// because, therefore, which shows
    CauseEffect,
    /// more than, rather than, unlike
    Comparison,
    /// furthermore, additionally
    Elaboration,
    /// "a hero is", by definition
    Definition,
}

impl ReasoningKind {
    /// Kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningKind::CauseEffect => "cause_effect",
            ReasoningKind::Comparison => "comparison",
            ReasoningKind::Elaboration => "elaboration",
            ReasoningKind::Definition => "definition",
        }
    }
}

/// Classification of a counter-argument signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterKind {
    /// on the other hand, some might argue
    ExplicitAcknowledgment,
    /// grants the other side partial truth
    Concession,
    /// but, yet, still
    Qualification,
}

/// Classification of a synthesis move
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisKind {
    /// therefore / in conclusion / ultimately
    Conclusive,
    /// explicitly weighs the evidence
    Weighing,
}

/// Typed bag of argument components extracted from one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentComponents {
    /// The claim term taken as the position, when one dominates
    pub position: Option<String>,

    /// Strength of the stance markers found
    pub position_strength: PositionStrength,

    /// Weight of the strongest stance marker (0-1)
    pub position_score: f64,

    /// All evidence items found
    pub evidence_items: Vec<String>,

    /// Evidence broken down by kind
    pub evidence_kinds: BTreeMap<EvidenceKind, Vec<String>>,

    /// Overall evidence quality label
    pub evidence_quality: EvidenceQuality,

    /// Normalized evidence score (0-1)
    pub evidence_score: f64,

    /// Sentences containing reasoning moves
    pub reasoning_chains: Vec<String>,

    /// Reasoning sentences broken down by kind
    pub reasoning_kinds: BTreeMap<ReasoningKind, Vec<String>>,

    /// Normalized reasoning score (0-1)
    pub reasoning_score: f64,

    /// Sentences acknowledging the other side
    pub counter_arguments: Vec<String>,

    /// Normalized counter-argument score (0-1)
    pub counter_score: f64,

    /// Concluding synthesis sentence, if one was found
    pub synthesis: Option<String>,

    /// Weight of the strongest synthesis marker (0-1)
    pub synthesis_score: f64,

    /// Highest reasoning layer the argument reaches
    pub reasoning_layer: ReasoningLayer,
}

impl ArgumentComponents {
    /// The all-empty result produced for empty input
    pub fn empty() -> Self {
        Self {
            position: None,
            position_strength: PositionStrength::Missing,
            position_score: 0.0,
            evidence_items: Vec::new(),
            evidence_kinds: BTreeMap::new(),
            evidence_quality: EvidenceQuality::Missing,
            evidence_score: 0.0,
            reasoning_chains: Vec::new(),
            reasoning_kinds: BTreeMap::new(),
            reasoning_score: 0.0,
            counter_arguments: Vec::new(),
            counter_score: 0.0,
            synthesis: None,
            synthesis_score: 0.0,
            reasoning_layer: ReasoningLayer::None,
        }
    }

    /// Reasoning sentences of a given kind
    pub fn reasoning_of(&self, kind: ReasoningKind) -> &[String] {
        self.reasoning_kinds
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Evidence items of a given kind
    pub fn evidence_of(&self, kind: EvidenceKind) -> &[String] {
        self.evidence_kinds
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distinct reasoning sentences (deduplicated across kinds)
    pub fn distinct_reasoning_chains(&self) -> usize {
        let mut seen: Vec<&String> = Vec::new();
        for chain in &self.reasoning_chains {
            if !seen.contains(&chain) {
                seen.push(chain);
            }
        }
        seen.len()
    }
}
