//! Markwell Feedback Synthesis
//!
//! Pure functions that turn extracted components and scores into
//! student-facing feedback: a current-state sentence and a priority-ordered
//! next-step sentence per sub-metric, plus concept and reasoning-layer
//! guidance. Deterministic; no side effects.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod analysis;
mod argument;

pub use analysis::analysis_feedback;
pub use argument::argument_feedback;

fn join_steps(steps: Vec<String>, fallback: &str) -> String {
    if steps.is_empty() {
        fallback.to_string()
    } else {
        format!("{}.", steps.join(". "))
    }
}
