//! Analysis-rubric taxonomy: verb tiers, effect tiers, connectors, topics
//!
//! The standard tables carry the weighted vocabulary for grading literary
//! analysis. Custom rubric versions are expressed as an
//! [`AnalysisTaxonomySpec`] and compiled at setup.

use crate::error::TaxonomyError;
use crate::pattern::PatternGroup;
use markwell_domain::{ConnectorKind, EffectTier, VerbTier};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Plain-data description of one verb tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerbTierSpec {
    /// Tier this entry belongs to
    pub tier: VerbTier,
    /// Weight per distinct matched verb
    pub weight: f64,
    /// Human-readable tier label
    pub label: String,
    /// Verbs in this tier
    pub verbs: Vec<String>,
}

/// Plain-data description of one effect tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectTierSpec {
    /// Tier this entry belongs to
    pub tier: EffectTier,
    /// Weight per matched sentence
    pub weight: f64,
    /// Human-readable tier label
    pub label: String,
    /// Regex patterns, matched against lowercased sentences
    pub patterns: Vec<String>,
}

/// Plain-data description of one connector category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorSpec {
    /// Functional category
    pub kind: ConnectorKind,
    /// Connector phrases, matched as lowercase substrings
    pub phrases: Vec<String>,
}

/// Plain-data description of a device-name alias
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasSpec {
    /// Student phrasing
    pub alias: String,
    /// Canonical registry name it maps to
    pub canonical: String,
}

/// Serde-friendly description of the full analysis taxonomy
///
/// `Default` yields the standard tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisTaxonomySpec {
    /// Verb tiers, in descending quality order
    pub verb_tiers: Vec<VerbTierSpec>,
    /// Effect tiers, in descending quality order
    pub effect_tiers: Vec<EffectTierSpec>,
    /// Connector categories
    pub connectors: Vec<ConnectorSpec>,
    /// Fixed topic vocabulary (devices, concepts)
    pub topic_vocabulary: Vec<String>,
    /// Words excluded from the capitalized-token topic heuristic
    pub topic_stoplist: Vec<String>,
    /// Device-name aliases seeded into the registry matcher
    pub device_aliases: Vec<AliasSpec>,
}

impl AnalysisTaxonomySpec {
    /// Compile the plain-data tables into an immutable taxonomy
    pub fn compile(self) -> Result<AnalysisTaxonomy, TaxonomyError> {
        AnalysisTaxonomy::from_spec(self)
    }
}

impl Default for AnalysisTaxonomySpec {
    fn default() -> Self {
        Self {
            verb_tiers: vec![
                VerbTierSpec {
                    tier: VerbTier::Tier1,
                    weight: 1.0,
                    label: "Critical Analysis".to_string(),
                    verbs: strings(&[
                        "creates",
                        "reveals",
                        "demonstrates",
                        "challenges",
                        "undermines",
                        "exposes",
                        "critiques",
                        "interrogates",
                        "disrupts",
                        "subverts",
                        "constructs",
                        "deconstructs",
                    ]),
                },
                VerbTierSpec {
                    tier: VerbTier::Tier2,
                    weight: 0.5,
                    label: "Pattern Recognition".to_string(),
                    verbs: strings(&[
                        "shows",
                        "indicates",
                        "suggests",
                        "implies",
                        "reflects",
                        "illustrates",
                        "represents",
                        "conveys",
                        "establishes",
                        "develops",
                        "presents",
                        "depicts",
                        "portrays",
                        "allows",
                        "enables",
                        "helps",
                        "hints",
                        "prepares",
                        "builds",
                    ]),
                },
                VerbTierSpec {
                    tier: VerbTier::Tier3,
                    weight: 0.0,
                    label: "Description/Summary".to_string(),
                    verbs: strings(&[
                        "is", "are", "was", "were", "has", "have", "had", "uses", "employs",
                        "does", "makes", "gets", "becomes", "seems", "appears", "looks",
                        "leave", "leaves",
                    ]),
                },
            ],
            effect_tiers: vec![
                EffectTierSpec {
                    tier: EffectTier::Tier1,
                    weight: 1.0,
                    label: "Alignment-Based Analysis".to_string(),
                    patterns: strings(&[
                        r"produc(?:es|ing)\s+(?:reinforcing|tensioning|mediating)\s+alignment",
                        r"creat(?:es|ing)\s+(?:reinforcing|tensioning)\s+alignment",
                        r"generat(?:es|ing)\s+meaning\s+through",
                        r"alignment\s+where",
                        r"the\s+gap\s+between.*constitutes",
                        r"productive\s+(?:mis)?alignment",
                    ]),
                },
                EffectTierSpec {
                    tier: EffectTier::Tier2,
                    weight: 0.75,
                    label: "Meaning Production".to_string(),
                    patterns: strings(&[
                        r"reveal(?:s|ing)\s+(?:how|that|why)",
                        r"expos(?:es|ing).*(?:system|pattern|contradiction)",
                        r"demonstrat(?:es|ing)\s+(?:how|that)",
                        r"enabl(?:es|ing)\s+readers?\s+to",
                        r"forc(?:es|ing)\s+readers?\s+to",
                        r"requir(?:es|ing)\s+readers?\s+to\s+construct",
                        r"show(?:s|ing)\s+(?:how|that).*(?:work|function|construct)",
                        r"suggest(?:s|ing)\s+(?:how|that|why)",
                    ]),
                },
                EffectTierSpec {
                    tier: EffectTier::Tier3,
                    weight: 0.5,
                    label: "Reader Engagement".to_string(),
                    patterns: strings(&[
                        r"makes?\s+(?:the\s+)?readers?\s+(?:feel|understand|question|recognize)",
                        r"allows?\s+readers?\s+to",
                        r"helps?\s+readers?\s+(?:understand|see|realize)",
                        r"invit(?:es|ing)\s+readers?\s+to",
                        r"encourag(?:es|ing)\s+readers?\s+to",
                        r"(?:focus|concentrat)(?:es|ing)\s+on",
                    ]),
                },
                EffectTierSpec {
                    tier: EffectTier::Tier4,
                    weight: 0.25,
                    label: "Generic Effect".to_string(),
                    patterns: strings(&[
                        r"makes?\s+(?:it|this|the\s+story)\s+(?:more\s+)?(?:interesting|engaging|meaningful)",
                        r"creates?\s+(?:tension|suspense|interest|mystery)",
                        r"shows?\s+(?:the|his|her)\s+(?:character|personality)",
                        r"is\s+important\s+(?:to|for|because)",
                        r"adds?\s+(?:depth|meaning|significance)",
                    ]),
                },
                EffectTierSpec {
                    tier: EffectTier::Tier5,
                    weight: 0.0,
                    label: "Missing/Circular".to_string(),
                    patterns: strings(&[
                        r"(?:this|it)\s+(?:is|was)\s+.*(?:important|significant|meaningful)\s*$",
                        r"^(?:therefore|thus|so)\s*$",
                        r"affects?\s+(?:the\s+reader|us)\s*$",
                    ]),
                },
            ],
            connectors: vec![
                ConnectorSpec {
                    kind: ConnectorKind::Addition,
                    phrases: strings(&[
                        "furthermore",
                        "moreover",
                        "additionally",
                        "also",
                        "in addition",
                        "besides",
                    ]),
                },
                ConnectorSpec {
                    kind: ConnectorKind::Contrast,
                    phrases: strings(&[
                        "however",
                        "nevertheless",
                        "whereas",
                        "although",
                        "yet",
                        "but",
                        "on the other hand",
                        "conversely",
                    ]),
                },
                ConnectorSpec {
                    kind: ConnectorKind::CauseEffect,
                    phrases: strings(&[
                        "therefore",
                        "thus",
                        "consequently",
                        "hence",
                        "thereby",
                        "as a result",
                        "so",
                    ]),
                },
                ConnectorSpec {
                    kind: ConnectorKind::Elaboration,
                    phrases: strings(&[
                        "which",
                        "whereby",
                        "wherein",
                        "through which",
                        "by which",
                    ]),
                },
                ConnectorSpec {
                    kind: ConnectorKind::Exemplification,
                    phrases: strings(&[
                        "for example",
                        "for instance",
                        "specifically",
                        "such as",
                        "namely",
                    ]),
                },
                ConnectorSpec {
                    kind: ConnectorKind::Summary,
                    phrases: strings(&[
                        "overall",
                        "in conclusion",
                        "ultimately",
                        "finally",
                        "in summary",
                    ]),
                },
            ],
            topic_vocabulary: strings(&[
                "narrator",
                "narration",
                "point of view",
                "pov",
                "perspective",
                "character",
                "protagonist",
                "author",
                "tone",
                "theme",
                "conflict",
                "resolution",
                "setting",
                "metaphor",
                "symbolism",
                "irony",
                "foreshadowing",
                "imagery",
                "reliable narrator",
                "unreliable narrator",
                "third person",
                "first person",
            ]),
            topic_stoplist: strings(&["the", "this", "that", "chapter", "in", "and", "for"]),
            device_aliases: vec![
                alias("first person", "first-person narration"),
                alias("second person", "second-person narration"),
                alias("third person", "third-person limited"),
                alias("third person omniscient", "third-person omniscient"),
                alias("pov", "third-person limited"),
                alias("fid", "free indirect discourse"),
                alias("stream of consciousness", "stream of consciousness"),
            ],
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn alias(alias: &str, canonical: &str) -> AliasSpec {
    AliasSpec {
        alias: alias.to_string(),
        canonical: canonical.to_string(),
    }
}

/// One compiled verb tier: word list plus a single alternation matcher
#[derive(Debug, Clone)]
pub struct VerbTierEntry {
    tier: VerbTier,
    weight: f64,
    label: String,
    verbs: Vec<String>,
    matcher: Regex,
}

impl VerbTierEntry {
    /// Tier this entry classifies into
    pub fn tier(&self) -> VerbTier {
        self.tier
    }

    /// Weight per distinct matched verb
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Human-readable label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Verbs in this tier
    pub fn verbs(&self) -> &[String] {
        &self.verbs
    }

    /// Distinct verbs from this tier found in the (lowercased) text
    pub fn find_matches(&self, text: &str) -> Vec<String> {
        let mut found = BTreeSet::new();
        for m in self.matcher.find_iter(text) {
            found.insert(m.as_str().to_string());
        }
        found.into_iter().collect()
    }
}

/// Immutable compiled taxonomy for the analysis rubric
#[derive(Debug, Clone)]
pub struct AnalysisTaxonomy {
    verb_tiers: Vec<VerbTierEntry>,
    effect_tiers: Vec<(EffectTier, PatternGroup)>,
    connectors: Vec<(ConnectorKind, Vec<String>)>,
    topic_vocabulary: Vec<String>,
    topic_stoplist: BTreeSet<String>,
    device_aliases: Vec<(String, String)>,
}

impl AnalysisTaxonomy {
    /// The standard tables
    pub fn standard() -> Self {
        AnalysisTaxonomySpec::default()
            .compile()
            .expect("standard analysis taxonomy patterns are valid")
    }

    /// Compile a taxonomy from its spec
    pub fn from_spec(spec: AnalysisTaxonomySpec) -> Result<Self, TaxonomyError> {
        if spec.verb_tiers.is_empty() {
            return Err(TaxonomyError::EmptyTable("verb_tiers".to_string()));
        }
        if spec.effect_tiers.is_empty() {
            return Err(TaxonomyError::EmptyTable("effect_tiers".to_string()));
        }

        let mut verb_tiers = Vec::with_capacity(spec.verb_tiers.len());
        for entry in spec.verb_tiers {
            let alternation = entry
                .verbs
                .iter()
                .map(|v| regex::escape(v))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"\b(?:{})\b", alternation);
            let matcher = Regex::new(&pattern).map_err(|source| TaxonomyError::InvalidPattern {
                table: "verb_tiers".to_string(),
                pattern,
                source,
            })?;
            verb_tiers.push(VerbTierEntry {
                tier: entry.tier,
                weight: entry.weight,
                label: entry.label,
                verbs: entry.verbs,
                matcher,
            });
        }
        verb_tiers.sort_by_key(|e| e.tier);

        let mut effect_tiers = Vec::with_capacity(spec.effect_tiers.len());
        for entry in spec.effect_tiers {
            let group =
                PatternGroup::compile("effect_tiers", entry.label, entry.weight, &entry.patterns)?;
            effect_tiers.push((entry.tier, group));
        }
        effect_tiers.sort_by_key(|(tier, _)| *tier);

        let connectors = spec
            .connectors
            .into_iter()
            .map(|c| (c.kind, c.phrases))
            .collect();

        Ok(Self {
            verb_tiers,
            effect_tiers,
            connectors,
            topic_vocabulary: spec.topic_vocabulary,
            topic_stoplist: spec.topic_stoplist.into_iter().collect(),
            device_aliases: spec
                .device_aliases
                .into_iter()
                .map(|a| (a.alias, a.canonical))
                .collect(),
        })
    }

    /// Verb tiers in descending quality order
    pub fn verb_tiers(&self) -> &[VerbTierEntry] {
        &self.verb_tiers
    }

    /// Effect tiers in descending quality order
    pub fn effect_tiers(&self) -> &[(EffectTier, PatternGroup)] {
        &self.effect_tiers
    }

    /// Connector categories and their phrases
    pub fn connectors(&self) -> &[(ConnectorKind, Vec<String>)] {
        &self.connectors
    }

    /// Fixed topic vocabulary
    pub fn topic_vocabulary(&self) -> &[String] {
        &self.topic_vocabulary
    }

    /// Whether a word is excluded from the capitalized-token heuristic
    pub fn is_stopword(&self, word: &str) -> bool {
        self.topic_stoplist.contains(&word.to_lowercase())
    }

    /// Device-name aliases (alias, canonical) pairs
    pub fn device_aliases(&self) -> &[(String, String)] {
        &self.device_aliases
    }

    /// Weight of a verb tier, as configured
    pub fn verb_tier_weight(&self, tier: VerbTier) -> f64 {
        self.verb_tiers
            .iter()
            .find(|e| e.tier == tier)
            .map(|e| e.weight)
            .unwrap_or(0.0)
    }
}

impl Default for AnalysisTaxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_compiles() {
        let tax = AnalysisTaxonomy::standard();
        assert_eq!(tax.verb_tiers().len(), 3);
        assert_eq!(tax.effect_tiers().len(), 5);
        assert_eq!(tax.connectors().len(), 6);
    }

    #[test]
    fn test_verb_tiers_descend() {
        let tax = AnalysisTaxonomy::standard();
        let tiers: Vec<VerbTier> = tax.verb_tiers().iter().map(|e| e.tier()).collect();
        assert_eq!(tiers, vec![VerbTier::Tier1, VerbTier::Tier2, VerbTier::Tier3]);
    }

    #[test]
    fn test_verb_matching_uses_word_boundaries() {
        let tax = AnalysisTaxonomy::standard();
        let tier1 = &tax.verb_tiers()[0];
        // "creates" should match, but not as a substring of another word
        assert_eq!(tier1.find_matches("the narrator creates distance"), vec!["creates"]);
        assert!(tier1.find_matches("recreates the scene").is_empty());
    }

    #[test]
    fn test_effect_tier_one_matches_alignment() {
        let tax = AnalysisTaxonomy::standard();
        let (tier, group) = &tax.effect_tiers()[0];
        assert_eq!(*tier, EffectTier::Tier1);
        assert!(group.is_match("the device generates meaning through contrast"));
    }

    #[test]
    fn test_stoplist_is_case_insensitive() {
        let tax = AnalysisTaxonomy::standard();
        assert!(tax.is_stopword("The"));
        assert!(tax.is_stopword("chapter"));
        assert!(!tax.is_stopword("Jonas"));
    }

    #[test]
    fn test_empty_table_rejected() {
        let mut spec = AnalysisTaxonomySpec::default();
        spec.verb_tiers.clear();
        assert!(matches!(
            spec.compile(),
            Err(TaxonomyError::EmptyTable(_))
        ));
    }

    #[test]
    fn test_invalid_effect_pattern_rejected() {
        let mut spec = AnalysisTaxonomySpec::default();
        spec.effect_tiers[0].patterns.push("(unclosed".to_string());
        assert!(matches!(
            spec.compile(),
            Err(TaxonomyError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_spec_toml_round_trip() {
        let spec = AnalysisTaxonomySpec::default();
        let toml_str = toml::to_string(&spec).unwrap();
        let parsed: AnalysisTaxonomySpec = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.verb_tiers.len(), spec.verb_tiers.len());
        assert_eq!(parsed.topic_vocabulary, spec.topic_vocabulary);
    }
}
