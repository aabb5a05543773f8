//! Markwell Domain Layer
//!
//! This crate contains the core vocabulary of the assessment engine: the
//! component model extracted from student writing, the ceiling-constrained
//! score result, the feedback map, and the trait seams that infrastructure
//! crates implement.
//!
//! ## Key Concepts
//!
//! - **Components**: the typed bag of rubric parts extracted from one document
//! - **Tier**: an ordered quality bucket weighting matched text
//! - **Ceiling**: the maximum value the dependent sub-metrics may take, fixed
//!   by the presence/quality sub-metric
//! - **Reasoning layer**: the four-level sophistication ladder used for
//!   argumentative depth
//!
//! ## Architecture
//!
//! Infrastructure implementations (pattern tables, LLM providers, grammar
//! batteries) live in other crates; this crate defines their trait boundaries.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod argument;
pub mod components;
pub mod feedback;
pub mod id;
pub mod quality;
pub mod rubric;
pub mod score;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use argument::{ArgumentComponents, CounterKind, EvidenceKind, ReasoningKind, SynthesisKind};
pub use components::{Components, ExtractedComponents};
pub use feedback::{keys, Feedback};
pub use id::EvaluationId;
pub use quality::{DetailQuality, EvidenceQuality, PositionStrength};
pub use rubric::{DocumentMeta, Rubric};
pub use score::ScoreResult;
pub use tier::{ConnectorKind, EffectTier, ReasoningLayer, VerbTier};
pub use traits::{
    ExternalOutcome, ExternalScore, ExternalScoreRequest, ExternalScorer, GrammarCheck,
    LlmProvider,
};
