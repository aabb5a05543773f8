//! Tier module - ordered quality buckets for matched text
//!
//! Tiers order matched text by analytical sophistication. Within one taxonomy
//! a sentence lands in exactly one tier (first match in descending order);
//! the same sentence may still contribute to other component kinds.

use serde::{Deserialize, Serialize};

/// Quality tier for analytical verbs
///
/// - Tier 1 "critical analysis" (creates, reveals, undermines, ...)
/// - Tier 2 "pattern recognition" (shows, suggests, illustrates, ...)
/// - Tier 3 "description/summary" (is, has, uses, ...) — descriptive only,
///   does not count as a functional match for presence scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbTier {
    /// Critical analysis verbs
    Tier1,
    /// Pattern recognition verbs
    Tier2,
    /// Descriptive/summary verbs
    Tier3,
}

impl VerbTier {
    /// All tiers in descending quality order
    pub const DESCENDING: [VerbTier; 3] = [VerbTier::Tier1, VerbTier::Tier2, VerbTier::Tier3];

    /// Tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            VerbTier::Tier1 => "tier_1",
            VerbTier::Tier2 => "tier_2",
            VerbTier::Tier3 => "tier_3",
        }
    }

    /// Whether matches in this tier count as functional analytical writing
    pub fn is_functional(&self) -> bool {
        !matches!(self, VerbTier::Tier3)
    }

    /// Quality factor used when averaging the tier mix for depth scoring
    pub fn quality_factor(&self) -> f64 {
        match self {
            VerbTier::Tier1 => 1.0,
            VerbTier::Tier2 => 0.75,
            VerbTier::Tier3 => 0.5,
        }
    }
}

/// Quality tier for effect statements (what the writing says the device does)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTier {
    /// Alignment-based analysis
    Tier1,
    /// Meaning production
    Tier2,
    /// Reader engagement
    Tier3,
    /// Generic effect
    Tier4,
    /// Missing/circular
    Tier5,
}

impl EffectTier {
    /// All tiers in descending quality order
    pub const DESCENDING: [EffectTier; 5] = [
        EffectTier::Tier1,
        EffectTier::Tier2,
        EffectTier::Tier3,
        EffectTier::Tier4,
        EffectTier::Tier5,
    ];

    /// Tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectTier::Tier1 => "tier_1",
            EffectTier::Tier2 => "tier_2",
            EffectTier::Tier3 => "tier_3",
            EffectTier::Tier4 => "tier_4",
            EffectTier::Tier5 => "tier_5",
        }
    }

    /// Whether matches in this tier count as functional for presence scoring
    ///
    /// The top three effect tiers are functional; generic and circular
    /// effects are not.
    pub fn is_functional(&self) -> bool {
        matches!(self, EffectTier::Tier1 | EffectTier::Tier2 | EffectTier::Tier3)
    }

    /// Quality factor used when averaging the tier mix for depth scoring
    pub fn quality_factor(&self) -> f64 {
        match self {
            EffectTier::Tier1 => 1.0,
            EffectTier::Tier2 => 0.75,
            EffectTier::Tier3 => 0.5,
            EffectTier::Tier4 => 0.25,
            EffectTier::Tier5 => 0.0,
        }
    }
}

/// Functional category of a cohesion connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorKind {
    /// furthermore, moreover, also, ...
    Addition,
    /// however, although, whereas, ...
    Contrast,
    /// therefore, thus, consequently, ...
    CauseEffect,
    /// which, whereby, wherein, ...
    Elaboration,
    /// for example, such as, ...
    Exemplification,
    /// overall, ultimately, in conclusion, ...
    Summary,
}

impl ConnectorKind {
    /// All connector categories
    pub const ALL: [ConnectorKind; 6] = [
        ConnectorKind::Addition,
        ConnectorKind::Contrast,
        ConnectorKind::CauseEffect,
        ConnectorKind::Elaboration,
        ConnectorKind::Exemplification,
        ConnectorKind::Summary,
    ];

    /// Category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorKind::Addition => "addition",
            ConnectorKind::Contrast => "contrast",
            ConnectorKind::CauseEffect => "cause_effect",
            ConnectorKind::Elaboration => "elaboration",
            ConnectorKind::Exemplification => "exemplification",
            ConnectorKind::Summary => "summary",
        }
    }
}

/// Four-level sophistication ladder for argumentative depth
///
/// Each level subsumes the ones below it; depth scoring uses the highest
/// level the document reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningLayer {
    /// No clear position taken
    None,
    /// Labels a position without explanation
    LabelOnly,
    /// Distinguishes between alternatives
    Comparison,
    /// Shows how evidence produces the position
    CausalChain,
    /// Frames the purpose of the configuration
    PurposeFraming,
}

impl ReasoningLayer {
    /// Numeric level (0-4)
    pub fn level(&self) -> u8 {
        match self {
            ReasoningLayer::None => 0,
            ReasoningLayer::LabelOnly => 1,
            ReasoningLayer::Comparison => 2,
            ReasoningLayer::CausalChain => 3,
            ReasoningLayer::PurposeFraming => 4,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ReasoningLayer::None => "No Clear Position",
            ReasoningLayer::LabelOnly => "Label Only",
            ReasoningLayer::Comparison => "Comparison",
            ReasoningLayer::CausalChain => "Cause-Effect",
            ReasoningLayer::PurposeFraming => "Purpose-Framing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_tier_functionality() {
        assert!(VerbTier::Tier1.is_functional());
        assert!(VerbTier::Tier2.is_functional());
        assert!(!VerbTier::Tier3.is_functional());
    }

    #[test]
    fn test_effect_tier_functionality() {
        assert!(EffectTier::Tier3.is_functional());
        assert!(!EffectTier::Tier4.is_functional());
        assert!(!EffectTier::Tier5.is_functional());
    }

    #[test]
    fn test_descending_order() {
        let factors: Vec<f64> = EffectTier::DESCENDING
            .iter()
            .map(|t| t.quality_factor())
            .collect();
        let mut sorted = factors.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(factors, sorted);
    }

    #[test]
    fn test_reasoning_layer_ordering() {
        assert!(ReasoningLayer::PurposeFraming > ReasoningLayer::CausalChain);
        assert!(ReasoningLayer::Comparison > ReasoningLayer::LabelOnly);
        assert_eq!(ReasoningLayer::PurposeFraming.level(), 4);
    }
}
