//! Markwell Assessment Engine
//!
//! The orchestration layer: builds the compiled taxonomies, the device
//! registry, and the grammar batteries from one `EngineConfig`, and grades
//! free-text student writing against either rubric.
//!
//! # Evaluation pipeline
//!
//! 1. Extract rubric components from the text
//! 2. Identify the literary device under discussion (analysis rubric)
//! 3. Score through the ceiling-constrained rule-based path
//! 4. Optionally substitute external scores, branching on the explicit
//!    `ExternalOutcome` tag; substituted scores are re-clamped
//! 5. Synthesize per-sub-metric feedback
//!
//! # Examples
//!
//! ```
//! use markwell_engine::{Engine, EngineConfig, EvaluateOptions};
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let evaluation = engine.evaluate(
//!     "The narrator reveals how the community hides the truth.",
//!     &EvaluateOptions::analysis(),
//! );
//! assert!(evaluation.scores.ceiling_holds());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod engine;
mod error;
mod output;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use output::{ComponentSummary, EvaluateOptions, Evaluation, ScoreOrigin};
