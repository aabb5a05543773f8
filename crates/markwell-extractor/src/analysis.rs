//! Topic/Verb/Object/Detail/Effect extraction for analytical writing

use crate::sentence::split_sentences;
use markwell_domain::{DetailQuality, ExtractedComponents};
use markwell_taxonomy::AnalysisTaxonomy;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

/// Extractor for the analysis rubric
///
/// Holds the compiled taxonomy plus the fixed structural probes used by
/// object extraction and the detail-quality decision tree.
#[derive(Debug, Clone)]
pub struct AnalysisExtractor {
    taxonomy: AnalysisTaxonomy,
    quote: Regex,
    object_probes: Vec<Regex>,
    detail_probes: Vec<Regex>,
    attribution: Regex,
    visual_probes: Vec<Regex>,
    temporal: Vec<Regex>,
    causal: Vec<Regex>,
    mechanism: Vec<Regex>,
    interpretive: Vec<Regex>,
}

fn probe(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static extraction pattern is valid")
}

fn probes(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| probe(p)).collect()
}

impl AnalysisExtractor {
    /// Build an extractor over a compiled taxonomy
    pub fn new(taxonomy: AnalysisTaxonomy) -> Self {
        Self {
            taxonomy,
            quote: probe(r#""([^"]+)""#),
            object_probes: probes(&[
                r"(?:make|makes|create|creates|cause|causes)\s+(?:the\s+)?readers?\s+(\w+)",
                r"readers?\s+(?:to\s+)?(\w+)",
                r"(?:believe|question|understand|feel|think|realize)\s+(\w+)",
            ]),
            detail_probes: probes(&[
                r"when\s+([^,\.]+)",
                r"through\s+([^,\.]+)",
                r"by\s+([^,\.]+)",
                r"with\s+([^,\.]+)",
                r"since\s+([^,\.]+)",
                r"after\s+([^,\.]+)",
            ]),
            attribution: probe(r"(?i)(?:p\.|page)\s*\d+|chapter\s+\d+"),
            visual_probes: probes(&[
                r"\b(?:eyes|face|hands|voice|body|snow|air|cold|warm|light|dark)\b",
                r"\b(?:walked|ran|felt|saw|heard|touched|breathed|looked)\b",
                r"\b(?:slowly|quickly|suddenly|carefully|gently|sharply)\b",
            ]),
            temporal: probes(&[
                r"(?:when|after|before|during|while)\s+\w+",
                r"(?:in|at)\s+(?:chapter|page|the\s+beginning|the\s+end)",
            ]),
            causal: probes(&[
                r"(?:because|since|due\s+to|as\s+a\s+result)",
                r"(?:to|in\s+order\s+to)\s+\w+",
            ]),
            mechanism: probes(&[
                r"(?:by|through|via|using)\s+\w+",
                r"(?:with|without)\s+\w+",
            ]),
            interpretive: probes(&[
                r"(?:which|that|this)\s+(?:shows|reveals|demonstrates|suggests|indicates)",
                r"(?:revealing|showing|demonstrating)\s+(?:how|that|why)",
            ]),
        }
    }

    /// The taxonomy this extractor was built over
    pub fn taxonomy(&self) -> &AnalysisTaxonomy {
        &self.taxonomy
    }

    /// Extract all components from one document
    ///
    /// Never fails; empty input yields [`ExtractedComponents::empty`].
    pub fn extract(&self, text: &str) -> ExtractedComponents {
        if text.trim().is_empty() {
            return ExtractedComponents::empty();
        }

        let text_lower = text.to_lowercase();
        let sentences = split_sentences(text);

        let mut components = ExtractedComponents::empty();
        components.topics = self.extract_topics(&text_lower, &sentences);
        self.extract_verbs(&text_lower, &mut components);
        components.objects = self.extract_objects(&text_lower, &sentences);
        components.details = self.extract_details(text, &text_lower);
        self.extract_effects(&sentences, &mut components);
        self.extract_connectors(&text_lower, &mut components);

        let (quality, score) = self.assess_detail_quality(&components.details, text, &text_lower);
        components.detail_quality = quality;
        components.detail_score = score;

        debug!(
            topics = components.topics.len(),
            verbs = components.verbs.len(),
            objects = components.objects.len(),
            details = components.details.len(),
            effects = components.effects.len(),
            detail_quality = quality.as_str(),
            "analysis extraction complete"
        );

        components
    }

    fn extract_topics(&self, text_lower: &str, sentences: &[String]) -> Vec<String> {
        let mut topics = BTreeSet::new();

        for topic in self.taxonomy.topic_vocabulary() {
            if text_lower.contains(topic.as_str()) {
                topics.insert(topic.clone());
            }
        }

        // Capitalized tokens are treated as named characters
        for sentence in sentences {
            for word in sentence.split_whitespace() {
                let word = word.trim_matches(|c: char| !c.is_alphanumeric());
                if word.len() > 2
                    && word.chars().next().is_some_and(char::is_uppercase)
                    && !self.taxonomy.is_stopword(word)
                {
                    topics.insert(word.to_string());
                }
            }
        }

        topics.into_iter().collect()
    }

    fn extract_verbs(&self, text_lower: &str, components: &mut ExtractedComponents) {
        for entry in self.taxonomy.verb_tiers() {
            let matched = entry.find_matches(text_lower);
            if matched.is_empty() {
                continue;
            }
            components.verb_quality_score += entry.weight() * matched.len() as f64;
            components.verbs.extend(matched.iter().cloned());
            components.verb_tiers.insert(entry.tier(), matched);
        }
    }

    fn extract_objects(&self, text_lower: &str, sentences: &[String]) -> Vec<String> {
        let mut objects = BTreeSet::new();

        for re in &self.object_probes {
            for caps in re.captures_iter(text_lower) {
                if let Some(m) = caps.get(1) {
                    if !m.as_str().is_empty() {
                        objects.insert(m.as_str().to_string());
                    }
                }
            }
        }

        // Words trailing an analytical verb are candidate objects
        for sentence in sentences {
            let sentence_lower = sentence.to_lowercase();
            for entry in self.taxonomy.verb_tiers() {
                for verb in entry.verbs() {
                    if let Some((_, tail)) = sentence_lower.split_once(verb.as_str()) {
                        for word in tail.split_whitespace().take(5) {
                            if word.len() > 3 {
                                objects.insert(word.to_string());
                            }
                        }
                    }
                }
            }
        }

        objects.into_iter().collect()
    }

    fn extract_details(&self, text: &str, text_lower: &str) -> Vec<String> {
        let mut details = Vec::new();

        for caps in self.quote.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                push_unique(&mut details, m.as_str().to_string());
            }
        }

        for re in &self.detail_probes {
            for caps in re.captures_iter(text_lower) {
                if let Some(m) = caps.get(1) {
                    let phrase = m.as_str().trim();
                    if !phrase.is_empty() {
                        push_unique(&mut details, phrase.to_string());
                    }
                }
            }
        }

        details
    }

    fn extract_effects(&self, sentences: &[String], components: &mut ExtractedComponents) {
        for sentence in sentences {
            let sentence_lower = sentence.to_lowercase();
            // Highest matching tier claims the sentence
            for (tier, group) in self.taxonomy.effect_tiers() {
                if group.is_match(&sentence_lower) {
                    components.effects.push(sentence.clone());
                    components
                        .effect_tiers
                        .entry(*tier)
                        .or_default()
                        .push(sentence.clone());
                    components.effect_quality_score += group.weight();
                    break;
                }
            }
        }
    }

    fn extract_connectors(&self, text_lower: &str, components: &mut ExtractedComponents) {
        for (kind, phrases) in self.taxonomy.connectors() {
            let found: Vec<String> = phrases
                .iter()
                .filter(|p| text_lower.contains(p.as_str()))
                .cloned()
                .collect();
            if !found.is_empty() {
                components.connectors.insert(*kind, found);
            }
        }
    }

    /// Decision tree mapping details to a quality label and score
    ///
    /// missing 2.0 / vague 3.0 / specific 4.0 / quote-with-attribution
    /// 4.0 plus 0.25 per contextual dimension, labelled precise at 4.25.
    fn assess_detail_quality(
        &self,
        details: &[String],
        text: &str,
        text_lower: &str,
    ) -> (DetailQuality, f64) {
        if details.is_empty() {
            return (DetailQuality::Missing, 2.0);
        }

        let has_quotes = self.quote.is_match(text);
        if !has_quotes {
            return if self.can_visualize(text_lower) {
                (DetailQuality::Specific, 4.0)
            } else {
                (DetailQuality::Vague, 3.0)
            };
        }

        if !self.attribution.is_match(text) {
            return (DetailQuality::Specific, 4.0);
        }

        let mut score = 4.0;
        for dims in [
            &self.temporal,
            &self.causal,
            &self.mechanism,
            &self.interpretive,
        ] {
            if dims.iter().any(|re| re.is_match(text_lower)) {
                score += 0.25;
            }
        }

        if score >= 4.25 {
            (DetailQuality::Precise, score)
        } else {
            (DetailQuality::Specific, score)
        }
    }

    fn can_visualize(&self, text_lower: &str) -> bool {
        let hits = self
            .visual_probes
            .iter()
            .filter(|re| re.is_match(text_lower))
            .count();
        hits >= 2
    }
}

fn push_unique(items: &mut Vec<String>, item: String) {
    if !items.contains(&item) {
        items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markwell_domain::{EffectTier, VerbTier};

    fn extractor() -> AnalysisExtractor {
        AnalysisExtractor::new(AnalysisTaxonomy::standard())
    }

    #[test]
    fn test_empty_input_yields_empty_components() {
        let c = extractor().extract("");
        assert_eq!(c, ExtractedComponents::empty());
        let c = extractor().extract("   \n  ");
        assert_eq!(c, ExtractedComponents::empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "The unreliable narrator creates distance. Jonas sees the apple change. \
                    This reveals how the community suppresses memory.";
        let a = extractor().extract(text);
        let b = extractor().extract(text);
        assert_eq!(a, b);
    }

    #[test]
    fn test_topics_include_vocabulary_and_names() {
        let c = extractor().extract("The narrator shows Jonas the truth.");
        assert!(c.topics.contains(&"narrator".to_string()));
        assert!(c.topics.contains(&"Jonas".to_string()));
        assert!(!c.topics.contains(&"The".to_string()));
    }

    #[test]
    fn test_verb_tier_classification() {
        let c = extractor().extract("The author reveals the truth and shows the pattern.");
        assert_eq!(c.verbs_in(VerbTier::Tier1), ["reveals"]);
        assert_eq!(c.verbs_in(VerbTier::Tier2), ["shows"]);
        assert!((c.verb_quality_score - 1.5).abs() < 1e-9);
        assert!(c.tier_breakdown_consistent());
    }

    #[test]
    fn test_effect_first_tier_wins_per_sentence() {
        // Matches both a tier-2 pattern (reveals how) and a tier-3 pattern
        // (helps readers understand); only the higher tier may claim it.
        let text = "The symbolism reveals how memory works and helps readers understand loss.";
        let c = extractor().extract(text);
        assert_eq!(c.effects.len(), 1);
        assert_eq!(c.effects_in(EffectTier::Tier2).len(), 1);
        assert!(c.effects_in(EffectTier::Tier3).is_empty());
        assert!((c.effect_quality_score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_details_capture_quotes_and_context() {
        let text = "When Jonas receives the memory, he changes. \
                    The author writes \"the snow was cold\" to ground it.";
        let c = extractor().extract(text);
        assert!(c.details.contains(&"the snow was cold".to_string()));
        assert!(c.details.iter().any(|d| d.starts_with("jonas receives")));
    }

    #[test]
    fn test_detail_quality_missing() {
        let c = extractor().extract("Good book");
        assert_eq!(c.detail_quality, DetailQuality::Missing);
        assert!((c.detail_score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_detail_quality_vague_without_concrete_markers() {
        let c = extractor().extract("The theme is shown when things happen to people somehow.");
        assert_eq!(c.detail_quality, DetailQuality::Vague);
        assert!((c.detail_score - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_detail_quality_specific_for_unattributed_quote() {
        let c = extractor().extract("The author writes \"the snow was cold\" when Jonas arrives.");
        assert_eq!(c.detail_quality, DetailQuality::Specific);
        assert!((c.detail_score - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_detail_quality_precise_with_attribution_and_context() {
        let text = "In chapter 19, the author writes \"the snow was cold\" when Jonas receives \
                    the memory, because the community hid pain, which reveals how control works.";
        let c = extractor().extract(text);
        assert_eq!(c.detail_quality, DetailQuality::Precise);
        assert!(c.detail_score >= 4.25);
    }

    #[test]
    fn test_connectors_grouped_by_category() {
        use markwell_domain::ConnectorKind;
        let c = extractor().extract("However, the tone shifts. Therefore the ending lands.");
        assert!(c.connectors.contains_key(&ConnectorKind::Contrast));
        assert!(c.connectors.contains_key(&ConnectorKind::CauseEffect));
        assert_eq!(c.connector_variety(), 2);
    }

    #[test]
    fn test_objects_follow_analytical_verbs() {
        let c = extractor().extract("The narration makes the reader question everything.");
        assert!(c.objects.contains(&"question".to_string()));
    }
}
