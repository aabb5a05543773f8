//! Markwell Taxonomy Layer
//!
//! Static, weighted pattern tables for both rubrics. Tables are immutable
//! configuration objects built once at engine construction and passed
//! explicitly — there is no module-level taxonomy state, so multiple engines
//! with differing rubric versions can coexist in one process.
//!
//! Each table is described by a plain-data spec (serde-friendly, editable)
//! and compiled into a form with pre-built regexes. Compilation is the one
//! place taxonomy configuration can fail; extraction never does.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod argument;
mod error;
mod pattern;

pub use analysis::{AnalysisTaxonomy, AnalysisTaxonomySpec, VerbTierEntry};
pub use argument::{ArgumentTaxonomy, ArgumentTaxonomySpec, ContradictionCheck};
pub use error::TaxonomyError;
pub use pattern::PatternGroup;
