//! Argument-rubric taxonomy: stance, evidence, reasoning, counter, synthesis
//!
//! Marker tables may reference the prompt's claim terms (e.g. "hero",
//! "victim") through the `{claim}` placeholder; compilation expands it into
//! an alternation over the configured terms, so the same tables serve any
//! two-sided prompt.

use crate::error::TaxonomyError;
use crate::pattern::PatternGroup;
use markwell_domain::{
    CounterKind, EvidenceKind, PositionStrength, ReasoningKind, SynthesisKind,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder expanded to the claim-term alternation at compile time
pub const CLAIM_PLACEHOLDER: &str = "{claim}";

/// One marker group in a plain-data argument table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerSpec<K> {
    /// Category this group classifies into
    pub kind: K,
    /// Weight per matched sentence
    pub weight: f64,
    /// Human-readable label
    pub label: String,
    /// Regex patterns, matched against lowercased text
    pub patterns: Vec<String>,
}

/// Serde-friendly description of the full argument taxonomy
///
/// `Default` yields the standard tables for a hero/victim prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgumentTaxonomySpec {
    /// Claim terms the prompt asks students to choose between
    pub claim_terms: Vec<String>,
    /// Stance-strength markers
    pub position: Vec<MarkerSpec<PositionStrength>>,
    /// Evidence-type markers
    pub evidence: Vec<MarkerSpec<EvidenceKind>>,
    /// Reasoning-move markers
    pub reasoning: Vec<MarkerSpec<ReasoningKind>>,
    /// Counter-argument markers
    pub counter: Vec<MarkerSpec<CounterKind>>,
    /// Synthesis markers
    pub synthesis: Vec<MarkerSpec<SynthesisKind>>,
    /// Logical-progression markers rewarded in coherence scoring
    pub flow_markers: Vec<String>,
}

impl ArgumentTaxonomySpec {
    /// Compile the plain-data tables into an immutable taxonomy
    pub fn compile(self) -> Result<ArgumentTaxonomy, TaxonomyError> {
        ArgumentTaxonomy::from_spec(self)
    }
}

impl Default for ArgumentTaxonomySpec {
    fn default() -> Self {
        Self {
            claim_terms: vec!["hero".to_string(), "victim".to_string()],
            position: vec![
                marker(PositionStrength::Strong, 1.0, "Strong Stance", &[
                    r"\b(?:i\s+)?(?:strongly\s+)?believe\s+(?:that\s+)?",
                    r"\b(?:i\s+)?(?:am\s+)?convinced\s+(?:that\s+)?",
                    r"\b(?:it\s+is\s+)?(?:clear|evident|obvious)\s+(?:that\s+)?",
                    r"\bwithout\s+(?:a\s+)?doubt",
                    r"\bdefinitely\b",
                    r"\bclearly\b",
                ]),
                marker(PositionStrength::Moderate, 0.75, "Moderate Stance", &[
                    r"\b(?:i\s+)?(?:think|feel)\s+(?:that\s+)?",
                    r"\b(?:in\s+my\s+)?opinion",
                    r"\b(?:i\s+)?would\s+(?:say|argue)\s+(?:that\s+)?",
                    r"\bto\s+me\b",
                    r"\bpersonally\b",
                ]),
                marker(PositionStrength::Implicit, 0.6, "Implicit Stance", &[
                    r"\bis\s+more\s+(?:of\s+)?a\b",
                    r"\bis\s+(?:a\s+)?{claim}\b",
                    r"\brather\s+than\b",
                    r"\binstead\s+of\b",
                ]),
                marker(PositionStrength::Hedged, 0.5, "Hedged Stance", &[
                    r"\bmaybe\b",
                    r"\bperhaps\b",
                    r"\bmight\s+be\b",
                    r"\bcould\s+be\b",
                    r"\bsort\s+of\b",
                    r"\bkind\s+of\b",
                ]),
            ],
            evidence: vec![
                marker(EvidenceKind::SpecificTextual, 1.0, "Specific Textual Evidence", &[
                    r#""[^"]{10,}""#,
                    r"(?:when|where)\s+(?:he|she|they)\s+\w+",
                    r"(?:chapter|scene|part)\s+(?:where|when)",
                    r"(?:the\s+)?memory\s+of\s+\w+",
                    r"(?:the\s+)?moment\s+(?:when|where)",
                ]),
                marker(EvidenceKind::Paraphrased, 0.75, "Paraphrased Evidence", &[
                    r"(?:this\s+is\s+shown|shown)\s+when",
                    r"(?:we\s+)?(?:see|saw)\s+(?:this|that)\s+when",
                    r"for\s+(?:example|instance)",
                    r"such\s+as\s+when",
                ]),
                marker(EvidenceKind::GeneralReference, 0.5, "General Reference", &[
                    r"\bin\s+the\s+(?:book|story|novel|text)\b",
                    r"\bthroughout\s+the\s+(?:book|story)\b",
                    r"\bhe\s+(?:tried|attempted|wanted)\s+to\b",
                    r"\bshe\s+(?:tried|attempted|wanted)\s+to\b",
                ]),
                marker(EvidenceKind::AssertionOnly, 0.25, "Assertion Without Evidence", &[
                    r"^(?:he|she|it)\s+(?:is|was)\s+",
                    r"\bbecause\s+(?:he|she|it)\s+(?:is|was)\b",
                ]),
            ],
            reasoning: vec![
                marker(ReasoningKind::CauseEffect, 1.0, "Cause-Effect Reasoning", &[
                    r"\bbecause\b",
                    r"\bsince\b",
                    r"\btherefore\b",
                    r"\bthus\b",
                    r"\bas\s+a\s+result\b",
                    r"\bconsequently\b",
                    r"\bwhich\s+(?:means|shows|proves|demonstrates)\b",
                    r"\bthis\s+(?:means|shows|proves|demonstrates)\b",
                ]),
                marker(ReasoningKind::Comparison, 0.75, "Comparative Reasoning", &[
                    r"\bmore\s+(?:of\s+a\s+)?(?:\w+)\s+than\b",
                    r"\bless\s+(?:of\s+a\s+)?(?:\w+)\s+than\b",
                    r"\brather\s+than\b",
                    r"\binstead\s+of\b",
                    r"\bunlike\b",
                    r"\bcompared\s+to\b",
                    r"\bwhereas\b",
                ]),
                marker(ReasoningKind::Elaboration, 0.5, "Elaboration", &[
                    r"\bfurthermore\b",
                    r"\bmoreover\b",
                    r"\badditionally\b",
                    r"\balso\b",
                    r"\band\s+(?:he|she|this)\b",
                ]),
                marker(ReasoningKind::Definition, 0.5, "Definition-Based", &[
                    r"\b(?:a\s+)?{claim}\s+(?:is|means)\b",
                    r"\bwhat\s+(?:it\s+)?means\s+to\s+be\b",
                    r"\bby\s+definition\b",
                ]),
            ],
            counter: vec![
                marker(CounterKind::ExplicitAcknowledgment, 1.0, "Explicit Counter-Acknowledgment", &[
                    r"\bon\s+(?:the\s+)?other\s+hand\b",
                    r"\bhowever\b",
                    r"\balthough\b",
                    r"\beven\s+though\b",
                    r"\bdespite\b",
                    r"\bwhile\s+(?:it\s+is\s+)?true\s+that\b",
                    r"\bsome\s+(?:might|may|could)\s+(?:say|argue)\b",
                    r"\byou\s+(?:can|could)\s+(?:also\s+)?(?:say|argue|make\s+a\s+claim)\b",
                ]),
                marker(CounterKind::Concession, 0.75, "Concession", &[
                    r"\b(?:he|she)\s+(?:is\s+)?also\s+(?:a\s+)?{claim}\b",
                    r"\bwe\s+(?:can\s+)?see\s+(?:that\s+)?(?:he|she)\s+is\s+both\b",
                    r"\b(?:he|she)\s+(?:can\s+)?be\s+seen\s+as\s+both\b",
                ]),
                marker(CounterKind::Qualification, 0.5, "Qualification", &[
                    r"\bbut\b",
                    r"\byet\b",
                    r"\bstill\b",
                    r"\bnot\s+(?:really|entirely|completely)\b",
                    r"\bmostly\b",
                ]),
            ],
            synthesis: vec![
                marker(SynthesisKind::Conclusive, 1.0, "Conclusive Synthesis", &[
                    r"\btherefore\b.*\b(?:more|is)\s+(?:a\s+)?{claim}\b",
                    r"\bin\s+conclusion\b",
                    r"\boverall\b",
                    r"\bultimately\b",
                    r"\bfinally\b",
                    r"\bso\s+(?:i\s+)?(?:strongly\s+)?believe\b",
                    r"\bthis\s+(?:is\s+)?why\b",
                ]),
                marker(SynthesisKind::Weighing, 0.75, "Evidence Weighing", &[
                    r"\b(?:has\s+)?(?:suffered|saved|helped)\s+more\s+than\b",
                    r"\boutweighs?\b",
                    r"\b(?:the\s+)?evidence\s+(?:shows|suggests|proves)\b",
                    r"\bweighing\b",
                ]),
            ],
            flow_markers: strings(&[
                r"\bfirst(?:ly)?\b",
                r"\bsecond(?:ly)?\b",
                r"\bthird(?:ly)?\b",
                r"\bfinally\b",
                r"\bfurthermore\b",
                r"\bmoreover\b",
                r"\bin\s+addition\b",
            ]),
        }
    }
}

fn marker<K>(kind: K, weight: f64, label: &str, patterns: &[&str]) -> MarkerSpec<K> {
    MarkerSpec {
        kind,
        weight,
        label: label.to_string(),
        patterns: strings(patterns),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Detector for a self-undermining stance on one claim term
///
/// Fires when the text both asserts and negates the same claim without the
/// negation being framed as a counter-argument.
#[derive(Debug, Clone)]
pub struct ContradictionCheck {
    term: String,
    asserts: Regex,
    negates: Regex,
    excused: Regex,
}

impl ContradictionCheck {
    fn for_term(term: &str) -> Result<Self, TaxonomyError> {
        let escaped = regex::escape(term);
        let asserts = format!(
            r"(?:is\s+(?:a\s+)?{0}|more\s+(?:of\s+a\s+)?{0})\b",
            escaped
        );
        let negates = format!(r"not\s+(?:really\s+)?(?:a\s+)?{}\b", escaped);
        let excused = format!(r"\b(?:but|however|although|while)\b.*{}", negates);
        Ok(Self {
            term: term.to_string(),
            asserts: compile_regex("contradictions", &asserts)?,
            negates: compile_regex("contradictions", &negates)?,
            excused: compile_regex("contradictions", &excused)?,
        })
    }

    /// Claim term this check guards
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether the (lowercased) text contradicts itself on this term
    pub fn is_contradicted(&self, text: &str) -> bool {
        self.asserts.is_match(text) && self.negates.is_match(text) && !self.excused.is_match(text)
    }
}

fn compile_regex(table: &str, pattern: &str) -> Result<Regex, TaxonomyError> {
    Regex::new(pattern).map_err(|source| TaxonomyError::InvalidPattern {
        table: table.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

/// Immutable compiled taxonomy for the argument rubric
#[derive(Debug, Clone)]
pub struct ArgumentTaxonomy {
    claim_terms: Vec<String>,
    claim_stances: Vec<(String, PatternGroup)>,
    position: Vec<(PositionStrength, PatternGroup)>,
    evidence: Vec<(EvidenceKind, PatternGroup)>,
    reasoning: Vec<(ReasoningKind, PatternGroup)>,
    counter: Vec<(CounterKind, PatternGroup)>,
    synthesis: Vec<(SynthesisKind, PatternGroup)>,
    flow_markers: PatternGroup,
    contradictions: Vec<ContradictionCheck>,
}

impl ArgumentTaxonomy {
    /// The standard tables (hero/victim prompt)
    pub fn standard() -> Self {
        ArgumentTaxonomySpec::default()
            .compile()
            .expect("standard argument taxonomy patterns are valid")
    }

    /// Compile a taxonomy from its spec
    pub fn from_spec(spec: ArgumentTaxonomySpec) -> Result<Self, TaxonomyError> {
        if spec.claim_terms.is_empty() {
            return Err(TaxonomyError::NoClaimTerms);
        }
        let alternation = format!(
            "(?:{})",
            spec.claim_terms
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|")
        );

        let mut claim_stances = Vec::with_capacity(spec.claim_terms.len());
        for term in &spec.claim_terms {
            let escaped = regex::escape(term);
            let patterns = vec![
                format!(r"(?:is|was)\s+(?:more\s+(?:of\s+)?)?(?:a\s+)?{}", escaped),
                format!(r"{}\s+(?:rather|instead)", escaped),
                format!(r"(?:believe|think|feel).*{}", escaped),
            ];
            let group = PatternGroup::compile("claim_stances", term.clone(), 1.0, &patterns)?;
            claim_stances.push((term.clone(), group));
        }

        let mut contradictions = Vec::with_capacity(spec.claim_terms.len());
        for term in &spec.claim_terms {
            contradictions.push(ContradictionCheck::for_term(term)?);
        }

        let flow_markers =
            PatternGroup::compile("flow_markers", "Logical Progression", 1.0, &spec.flow_markers)?;

        Ok(Self {
            claim_terms: spec.claim_terms,
            claim_stances,
            position: compile_markers("position", spec.position, &alternation)?,
            evidence: compile_markers("evidence", spec.evidence, &alternation)?,
            reasoning: compile_markers("reasoning", spec.reasoning, &alternation)?,
            counter: compile_markers("counter", spec.counter, &alternation)?,
            synthesis: compile_markers("synthesis", spec.synthesis, &alternation)?,
            flow_markers,
            contradictions,
        })
    }

    /// Claim terms the prompt asks students to choose between
    pub fn claim_terms(&self) -> &[String] {
        &self.claim_terms
    }

    /// Per-term stance detectors: (term, patterns asserting that term)
    pub fn claim_stances(&self) -> &[(String, PatternGroup)] {
        &self.claim_stances
    }

    /// Stance-strength markers
    pub fn position_markers(&self) -> &[(PositionStrength, PatternGroup)] {
        &self.position
    }

    /// Evidence-type markers
    pub fn evidence_markers(&self) -> &[(EvidenceKind, PatternGroup)] {
        &self.evidence
    }

    /// Reasoning-move markers
    pub fn reasoning_markers(&self) -> &[(ReasoningKind, PatternGroup)] {
        &self.reasoning
    }

    /// Counter-argument markers
    pub fn counter_markers(&self) -> &[(CounterKind, PatternGroup)] {
        &self.counter
    }

    /// Synthesis markers
    pub fn synthesis_markers(&self) -> &[(SynthesisKind, PatternGroup)] {
        &self.synthesis
    }

    /// Logical-progression markers
    pub fn flow_markers(&self) -> &PatternGroup {
        &self.flow_markers
    }

    /// Per-term contradiction detectors
    pub fn contradiction_checks(&self) -> &[ContradictionCheck] {
        &self.contradictions
    }
}

impl Default for ArgumentTaxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

fn compile_markers<K>(
    table: &str,
    specs: Vec<MarkerSpec<K>>,
    claim_alternation: &str,
) -> Result<Vec<(K, PatternGroup)>, TaxonomyError> {
    if specs.is_empty() {
        return Err(TaxonomyError::EmptyTable(table.to_string()));
    }
    let mut out = Vec::with_capacity(specs.len());
    for spec in specs {
        let patterns: Vec<String> = spec
            .patterns
            .iter()
            .map(|p| p.replace(CLAIM_PLACEHOLDER, claim_alternation))
            .collect();
        let group = PatternGroup::compile(table, spec.label, spec.weight, &patterns)?;
        out.push((spec.kind, group));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_compiles() {
        let tax = ArgumentTaxonomy::standard();
        assert_eq!(tax.claim_terms(), &["hero", "victim"]);
        assert_eq!(tax.position_markers().len(), 4);
        assert_eq!(tax.evidence_markers().len(), 4);
        assert_eq!(tax.reasoning_markers().len(), 4);
        assert_eq!(tax.counter_markers().len(), 3);
        assert_eq!(tax.synthesis_markers().len(), 2);
    }

    #[test]
    fn test_claim_placeholder_expands() {
        let tax = ArgumentTaxonomy::standard();
        let implicit = tax
            .position_markers()
            .iter()
            .find(|(k, _)| *k == PositionStrength::Implicit)
            .map(|(_, g)| g)
            .unwrap();
        assert!(implicit.is_match("jonas is a hero"));
        assert!(implicit.is_match("jonas is a victim"));
        assert!(!implicit.is_match("jonas is a leader"));
    }

    #[test]
    fn test_claim_stance_detection() {
        let tax = ArgumentTaxonomy::standard();
        let (term, group) = &tax.claim_stances()[0];
        assert_eq!(term, "hero");
        assert!(group.is_match("i believe jonas is a hero"));
        assert!(group.is_match("he is a hero"));
        assert!(group.is_match("jonas is more of a hero than a victim"));
        assert!(!group.is_match("the community is dull"));
    }

    #[test]
    fn test_contradiction_detected_without_counter_framing() {
        let tax = ArgumentTaxonomy::standard();
        let text = "jonas is a victim. he is not really a victim.";
        assert!(tax
            .contradiction_checks()
            .iter()
            .any(|c| c.is_contradicted(text)));
    }

    #[test]
    fn test_counter_framed_negation_is_excused() {
        let tax = ArgumentTaxonomy::standard();
        let text = "jonas is a victim, but some might say he is not really a victim.";
        assert!(!tax
            .contradiction_checks()
            .iter()
            .any(|c| c.is_contradicted(text)));
    }

    #[test]
    fn test_empty_claim_terms_rejected() {
        let mut spec = ArgumentTaxonomySpec::default();
        spec.claim_terms.clear();
        assert!(matches!(spec.compile(), Err(TaxonomyError::NoClaimTerms)));
    }

    #[test]
    fn test_flow_markers_match() {
        let tax = ArgumentTaxonomy::standard();
        assert!(tax.flow_markers().is_match("firstly, he saves the baby"));
        assert!(!tax.flow_markers().is_match("he saves the baby"));
    }

    #[test]
    fn test_spec_toml_round_trip() {
        let spec = ArgumentTaxonomySpec::default();
        let toml_str = toml::to_string(&spec).unwrap();
        let parsed: ArgumentTaxonomySpec = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.claim_terms, spec.claim_terms);
        assert_eq!(parsed.reasoning.len(), spec.reasoning.len());
    }
}
