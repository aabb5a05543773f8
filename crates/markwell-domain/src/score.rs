//! Ceiling-constrained score result
//!
//! The presence sub-metric (sm1) fixes a ceiling; the depth (sm2) and
//! cohesion (sm3) sub-metrics are clamped to it on construction. Clamping is
//! enforced here so every scoring path — rule-based or external — goes
//! through the same invariant.

use serde::{Deserialize, Serialize};

/// Fixed sub-metric weights: presence 0.4, depth 0.3, cohesion 0.3
pub const SM1_WEIGHT: f64 = 0.4;
/// Depth weight
pub const SM2_WEIGHT: f64 = 0.3;
/// Cohesion weight
pub const SM3_WEIGHT: f64 = 0.3;

/// The three dependent sub-scores plus the overall weighted score
///
/// Computed once per evaluation, read-only thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Presence/quality sub-metric (0-5)
    pub sm1: f64,

    /// Ceiling fixed by sm1; sm2 and sm3 cannot exceed it
    pub ceiling: f64,

    /// Depth/density sub-metric, clamped to the ceiling
    pub sm2: f64,

    /// Cohesion sub-metric, clamped to the ceiling
    pub sm3: f64,

    /// Weighted overall score (0-5)
    pub overall: f64,

    /// Overall score scaled to points (0-25)
    pub total_points: f64,
}

impl ScoreResult {
    /// Build a result, clamping sm2 and sm3 to the ceiling
    ///
    /// Any substitute scoring path (e.g. an external scorer) must also pass
    /// through here, so the ceiling invariant holds for all outputs.
    pub fn new(sm1: f64, ceiling: f64, sm2: f64, sm3: f64) -> Self {
        let sm2 = sm2.min(ceiling);
        let sm3 = sm3.min(ceiling);
        let overall = sm1 * SM1_WEIGHT + sm2 * SM2_WEIGHT + sm3 * SM3_WEIGHT;

        Self {
            sm1,
            ceiling,
            sm2,
            sm3,
            overall,
            total_points: overall * 5.0,
        }
    }

    /// Whether the ceiling invariant holds (used by property tests)
    pub fn ceiling_holds(&self) -> bool {
        self.sm2 <= self.ceiling && self.sm3 <= self.ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping_applied() {
        let r = ScoreResult::new(3.0, 3.0, 5.0, 4.5);
        assert_eq!(r.sm2, 3.0);
        assert_eq!(r.sm3, 3.0);
        assert!(r.ceiling_holds());
    }

    #[test]
    fn test_overall_weighting() {
        let r = ScoreResult::new(5.0, 5.0, 4.0, 3.0);
        let expected = 5.0 * 0.4 + 4.0 * 0.3 + 3.0 * 0.3;
        assert!((r.overall - expected).abs() < 1e-9);
        assert!((r.total_points - expected * 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_unclamped_values_pass_through() {
        let r = ScoreResult::new(4.5, 4.5, 4.0, 4.25);
        assert_eq!(r.sm2, 4.0);
        assert_eq!(r.sm3, 4.25);
    }
}
