//! Evaluation identifiers

use std::fmt;

/// Identifier assigned to each graded document
///
/// Wraps a UUIDv7 so identifiers minted across a batch sort in generation
/// order, keeping batch reports chronological without a counter shared
/// between engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EvaluationId(u128);

impl EvaluationId {
    /// Mint a fresh identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use markwell_domain::EvaluationId;
    ///
    /// let first = EvaluationId::new();
    /// let second = EvaluationId::new();
    /// assert_ne!(first, second);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Rebuild an identifier from its raw value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an identifier from its canonical UUID text form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Raw value, usable as a storage key
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for EvaluationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}
