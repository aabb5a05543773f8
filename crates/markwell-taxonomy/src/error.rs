//! Error types for taxonomy compilation

use thiserror::Error;

/// Errors that can occur while compiling taxonomy tables
///
/// These are configuration errors: they surface at engine setup and never
/// during extraction or scoring.
#[derive(Error, Debug)]
pub enum TaxonomyError {
    /// A pattern in a table failed to compile
    #[error("Invalid pattern '{pattern}' in table '{table}': {source}")]
    InvalidPattern {
        /// Name of the table containing the pattern
        table: String,
        /// The offending pattern
        pattern: String,
        /// Underlying regex error
        source: regex::Error,
    },

    /// A required table has no entries
    #[error("Table '{0}' has no entries")]
    EmptyTable(String),

    /// The argument taxonomy has no claim terms to build position patterns from
    #[error("Claim terms must not be empty")]
    NoClaimTerms,
}
