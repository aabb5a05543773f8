//! Position/Evidence/Reasoning/Counter/Synthesis extraction for
//! argumentative writing

use crate::sentence::split_sentences;
use markwell_domain::{
    ArgumentComponents, EvidenceKind, EvidenceQuality, PositionStrength, ReasoningKind,
    ReasoningLayer,
};
use markwell_taxonomy::ArgumentTaxonomy;
use regex::Regex;
use tracing::debug;

// Normalization divisors: pieces of full-weight evidence / reasoning moves
// needed for a 1.0 component score.
const EVIDENCE_FULL_CREDIT: f64 = 4.0;
const REASONING_FULL_CREDIT: f64 = 3.0;

/// Extractor for the argument rubric
#[derive(Debug, Clone)]
pub struct ArgumentExtractor {
    taxonomy: ArgumentTaxonomy,
    quote: Regex,
}

impl ArgumentExtractor {
    /// Build an extractor over a compiled taxonomy
    pub fn new(taxonomy: ArgumentTaxonomy) -> Self {
        Self {
            taxonomy,
            quote: Regex::new(r#""([^"]+)""#).expect("static extraction pattern is valid"),
        }
    }

    /// The taxonomy this extractor was built over
    pub fn taxonomy(&self) -> &ArgumentTaxonomy {
        &self.taxonomy
    }

    /// Extract all components from one document
    ///
    /// Never fails; empty input yields [`ArgumentComponents::empty`].
    pub fn extract(&self, text: &str) -> ArgumentComponents {
        if text.trim().is_empty() {
            return ArgumentComponents::empty();
        }

        let text_lower = text.to_lowercase();
        let sentences = split_sentences(text);

        let mut components = ArgumentComponents::empty();
        self.extract_position(&text_lower, &mut components);
        self.extract_evidence(text, &text_lower, &mut components);
        self.extract_reasoning(&sentences, &mut components);
        self.extract_counter_arguments(&sentences, &mut components);
        self.extract_synthesis(&sentences, &mut components);
        components.reasoning_layer = self.assess_layer(&components);

        debug!(
            position = components.position.as_deref().unwrap_or("unclear"),
            strength = components.position_strength.as_str(),
            evidence = components.evidence_items.len(),
            reasoning = components.reasoning_chains.len(),
            layer = components.reasoning_layer.level(),
            "argument extraction complete"
        );

        components
    }

    fn extract_position(&self, text_lower: &str, components: &mut ArgumentComponents) {
        // The claim term with the most matching stance patterns wins; a tie
        // between matched terms means both sides were acknowledged.
        let counts: Vec<(&String, usize)> = self
            .taxonomy
            .claim_stances()
            .iter()
            .map(|(term, group)| (term, group.match_count(text_lower)))
            .collect();

        let best = counts.iter().map(|(_, n)| *n).max().unwrap_or(0);
        if best > 0 {
            let leaders: Vec<&String> = counts
                .iter()
                .filter(|(_, n)| *n == best)
                .map(|(term, _)| *term)
                .collect();
            components.position = if leaders.len() == 1 {
                Some(leaders[0].clone())
            } else {
                Some("both_acknowledged".to_string())
            };
        }

        for (strength, group) in self.taxonomy.position_markers() {
            if group.is_match(text_lower) && group.weight() > components.position_score {
                components.position_strength = *strength;
                components.position_score = group.weight();
            }
        }
    }

    fn extract_evidence(&self, text: &str, text_lower: &str, components: &mut ArgumentComponents) {
        let mut total = 0.0;

        // Quoted text is the strongest evidence and is collected first so
        // marker matches that merely re-find a quote are not double counted.
        let mut quotes_lower: Vec<String> = Vec::new();
        for caps in self.quote.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                let q = m.as_str();
                if q.len() > 3 {
                    components.evidence_items.push(q.to_string());
                    components
                        .evidence_kinds
                        .entry(EvidenceKind::SpecificTextual)
                        .or_default()
                        .push(q.to_string());
                    quotes_lower.push(q.to_lowercase());
                    total += 1.0;
                }
            }
        }

        for (kind, group) in self.taxonomy.evidence_markers() {
            for m in group.captures(text_lower) {
                if m.len() > 10 && !quotes_lower.iter().any(|q| m.contains(q.as_str())) {
                    components.evidence_items.push(m.clone());
                    components.evidence_kinds.entry(*kind).or_default().push(m);
                    total += group.weight();
                }
            }
        }

        components.evidence_quality = self.classify_evidence_quality(components);
        components.evidence_score = (total / EVIDENCE_FULL_CREDIT).min(1.0);
    }

    /// Quality reflects the best evidence present, and requires multiple
    /// good pieces for the top label.
    fn classify_evidence_quality(&self, components: &ArgumentComponents) -> EvidenceQuality {
        let specific = components.evidence_of(EvidenceKind::SpecificTextual).len();
        let paraphrased = components.evidence_of(EvidenceKind::Paraphrased).len();
        let general = components.evidence_of(EvidenceKind::GeneralReference).len();
        let assertion = components.evidence_of(EvidenceKind::AssertionOnly).len();

        if specific >= 2 || (specific >= 1 && paraphrased >= 1) {
            EvidenceQuality::Specific
        } else if specific == 1 || paraphrased >= 2 {
            EvidenceQuality::Paraphrased
        } else if paraphrased >= 1 || general >= 2 {
            EvidenceQuality::General
        } else if assertion > 0 {
            EvidenceQuality::Assertion
        } else {
            EvidenceQuality::Missing
        }
    }

    fn extract_reasoning(&self, sentences: &[String], components: &mut ArgumentComponents) {
        let mut total = 0.0;

        for sentence in sentences {
            let sentence_lower = sentence.to_lowercase();
            // A sentence counts at most once per reasoning kind
            for (kind, group) in self.taxonomy.reasoning_markers() {
                if group.is_match(&sentence_lower) {
                    components.reasoning_chains.push(sentence.clone());
                    components
                        .reasoning_kinds
                        .entry(*kind)
                        .or_default()
                        .push(sentence.clone());
                    total += group.weight();
                }
            }
        }

        components.reasoning_score = (total / REASONING_FULL_CREDIT).min(1.0);
    }

    fn extract_counter_arguments(&self, sentences: &[String], components: &mut ArgumentComponents) {
        let mut total = 0.0;

        for sentence in sentences {
            let sentence_lower = sentence.to_lowercase();
            for (_, group) in self.taxonomy.counter_markers() {
                if group.is_match(&sentence_lower) {
                    components.counter_arguments.push(sentence.clone());
                    total += group.weight();
                }
            }
        }

        // One solid acknowledgment is full credit
        components.counter_score = total.min(1.0);
    }

    fn extract_synthesis(&self, sentences: &[String], components: &mut ArgumentComponents) {
        // Synthesis lives in the closing window of the response
        let window = sentences.len().saturating_sub(3);
        for sentence in &sentences[window..] {
            let sentence_lower = sentence.to_lowercase();
            for (_, group) in self.taxonomy.synthesis_markers() {
                if group.is_match(&sentence_lower) && group.weight() > components.synthesis_score {
                    components.synthesis = Some(sentence.clone());
                    components.synthesis_score = group.weight();
                }
            }
        }
    }

    fn assess_layer(&self, components: &ArgumentComponents) -> ReasoningLayer {
        let cause_effect = components.reasoning_of(ReasoningKind::CauseEffect).len() >= 2;
        let counter = !components.counter_arguments.is_empty();
        let synthesis = components.synthesis.is_some();

        if cause_effect && counter && synthesis {
            ReasoningLayer::PurposeFraming
        } else if cause_effect {
            ReasoningLayer::CausalChain
        } else if !components.reasoning_of(ReasoningKind::Comparison).is_empty() {
            ReasoningLayer::Comparison
        } else if components.position_strength != PositionStrength::Missing {
            ReasoningLayer::LabelOnly
        } else {
            ReasoningLayer::None
        }
    }
}
