//! Extracted component model for analytical writing
//!
//! One `ExtractedComponents` instance is created per document evaluation and
//! is immutable after construction. Invariant: every string in a tier
//! breakdown also appears in the corresponding flat list.

use crate::argument::ArgumentComponents;
use crate::quality::DetailQuality;
use crate::tier::{ConnectorKind, EffectTier, VerbTier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Typed bag of rubric components extracted from one document
///
/// All collections are deduplicated and kept in stable (sorted or
/// first-encounter) order so extraction is a pure function of its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedComponents {
    /// Topics under analysis (devices, concepts, named characters)
    pub topics: Vec<String>,

    /// Analytical verbs found, across all tiers
    pub verbs: Vec<String>,

    /// Objects of the analysis (what is affected)
    pub objects: Vec<String>,

    /// Textual evidence: quoted spans and contextual phrases
    pub details: Vec<String>,

    /// Effect sentences, across all tiers
    pub effects: Vec<String>,

    /// Verb matches broken down by tier
    pub verb_tiers: BTreeMap<VerbTier, Vec<String>>,

    /// Effect sentences broken down by tier
    pub effect_tiers: BTreeMap<EffectTier, Vec<String>>,

    /// Connectors found, grouped by functional category
    pub connectors: BTreeMap<ConnectorKind, Vec<String>>,

    /// Decision-tree quality label for the details
    pub detail_quality: DetailQuality,

    /// Numeric detail score, the ceiling-lookup key
    pub detail_score: f64,

    /// Sum of tier weights over distinct matched verbs
    pub verb_quality_score: f64,

    /// Sum of tier weights over matched effect sentences
    pub effect_quality_score: f64,
}

impl ExtractedComponents {
    /// The all-empty result produced for empty input
    pub fn empty() -> Self {
        Self {
            topics: Vec::new(),
            verbs: Vec::new(),
            objects: Vec::new(),
            details: Vec::new(),
            effects: Vec::new(),
            verb_tiers: BTreeMap::new(),
            effect_tiers: BTreeMap::new(),
            connectors: BTreeMap::new(),
            detail_quality: DetailQuality::Missing,
            detail_score: 2.0,
            verb_quality_score: 0.0,
            effect_quality_score: 0.0,
        }
    }

    /// Verbs matched in a given tier
    pub fn verbs_in(&self, tier: VerbTier) -> &[String] {
        self.verb_tiers.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Effect sentences matched in a given tier
    pub fn effects_in(&self, tier: EffectTier) -> &[String] {
        self.effect_tiers.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any verb landed in a functional (top-two) tier
    pub fn has_functional_verb(&self) -> bool {
        VerbTier::DESCENDING
            .iter()
            .filter(|t| t.is_functional())
            .any(|t| !self.verbs_in(*t).is_empty())
    }

    /// Whether any effect landed in a functional tier
    pub fn has_functional_effect(&self) -> bool {
        EffectTier::DESCENDING
            .iter()
            .filter(|t| t.is_functional())
            .any(|t| !self.effects_in(*t).is_empty())
    }

    /// Count of component kinds with at least one functional match
    ///
    /// Verbs and effects count only when a functional tier matched; the
    /// lowest descriptive tiers do not establish presence.
    pub fn functional_presence_count(&self) -> usize {
        [
            !self.topics.is_empty(),
            self.has_functional_verb(),
            !self.objects.is_empty(),
            !self.details.is_empty(),
            self.has_functional_effect(),
        ]
        .iter()
        .filter(|p| **p)
        .count()
    }

    /// Number of distinct connector categories used
    pub fn connector_variety(&self) -> usize {
        self.connectors.len()
    }

    /// Total connectors found across all categories
    pub fn connector_total(&self) -> usize {
        self.connectors.values().map(Vec::len).sum()
    }

    /// Verify the tier-breakdown invariant (used by tests)
    ///
    /// Every string in a tier breakdown must appear in the flat list.
    pub fn tier_breakdown_consistent(&self) -> bool {
        let verbs_ok = self
            .verb_tiers
            .values()
            .flatten()
            .all(|v| self.verbs.contains(v));
        let effects_ok = self
            .effect_tiers
            .values()
            .flatten()
            .all(|e| self.effects.contains(e));
        verbs_ok && effects_ok
    }
}

/// Components extracted under either rubric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rubric", rename_all = "snake_case")]
pub enum Components {
    /// Topic/Verb/Object/Detail/Effect extraction
    Analysis(ExtractedComponents),
    /// Position/Evidence/Reasoning/Counter/Synthesis extraction
    Argument(ArgumentComponents),
}

impl Components {
    /// Analysis components, if this is the analysis rubric
    pub fn as_analysis(&self) -> Option<&ExtractedComponents> {
        match self {
            Components::Analysis(c) => Some(c),
            Components::Argument(_) => None,
        }
    }

    /// Argument components, if this is the argument rubric
    pub fn as_argument(&self) -> Option<&ArgumentComponents> {
        match self {
            Components::Argument(c) => Some(c),
            Components::Analysis(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_components() {
        let c = ExtractedComponents::empty();
        assert_eq!(c.functional_presence_count(), 0);
        assert_eq!(c.connector_variety(), 0);
        assert_eq!(c.detail_quality, DetailQuality::Missing);
        assert!(c.tier_breakdown_consistent());
    }

    #[test]
    fn test_presence_ignores_descriptive_verbs() {
        let mut c = ExtractedComponents::empty();
        c.verbs = vec!["is".to_string()];
        c.verb_tiers
            .insert(VerbTier::Tier3, vec!["is".to_string()]);
        assert!(!c.has_functional_verb());
        assert_eq!(c.functional_presence_count(), 0);

        c.verbs.push("reveals".to_string());
        c.verb_tiers
            .insert(VerbTier::Tier1, vec!["reveals".to_string()]);
        assert!(c.has_functional_verb());
        assert_eq!(c.functional_presence_count(), 1);
    }

    #[test]
    fn test_inconsistent_breakdown_detected() {
        let mut c = ExtractedComponents::empty();
        c.verb_tiers
            .insert(VerbTier::Tier1, vec!["reveals".to_string()]);
        assert!(!c.tier_breakdown_consistent());
    }
}
