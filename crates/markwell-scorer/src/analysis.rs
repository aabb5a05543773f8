//! Scoring for the analysis rubric

use crate::RuleScores;
use markwell_domain::{EffectTier, ExtractedComponents, GrammarCheck, ScoreResult, VerbTier};
use tracing::debug;

/// Presence sub-metric: functional component count plus detail score
/// through the fixed lookup, producing the score and its ceiling
pub(crate) fn score_presence(components: &ExtractedComponents) -> (f64, f64) {
    let present = components.functional_presence_count();
    let detail = components.detail_score;

    if present == 5 && detail >= 5.0 {
        (5.0, 5.0)
    } else if present == 5 && detail >= 4.5 {
        (4.5, 4.5)
    } else if present == 5 && detail >= 4.0 {
        (4.0, 4.0)
    } else if present >= 4 && detail >= 4.0 {
        (3.5, 4.0)
    } else if present >= 4 || detail >= 3.0 {
        (3.0, 3.0)
    } else if present >= 3 {
        (2.5, 3.0)
    } else if present >= 2 {
        (2.0, 2.5)
    } else {
        (1.5, 2.0)
    }
}

/// Weighted average tier quality over matched items, 1.0 best
///
/// An empty mix yields the neutral 0.5.
fn average_verb_quality(components: &ExtractedComponents) -> f64 {
    let mut weight = 0.0;
    let mut count = 0usize;
    for tier in VerbTier::DESCENDING {
        let n = components.verbs_in(tier).len();
        weight += tier.quality_factor() * n as f64;
        count += n;
    }
    if count > 0 {
        weight / count as f64
    } else {
        0.5
    }
}

fn average_effect_quality(components: &ExtractedComponents) -> f64 {
    let mut weight = 0.0;
    let mut count = 0usize;
    for tier in EffectTier::DESCENDING {
        let n = components.effects_in(tier).len();
        weight += tier.quality_factor() * n as f64;
        count += n;
    }
    if count > 0 {
        weight / count as f64
    } else {
        0.5
    }
}

/// Depth sub-metric: analytical sentence count scaled by tier quality
fn score_depth(text: &str, components: &ExtractedComponents, ceiling: f64) -> (f64, f64) {
    let functional: Vec<&String> = components
        .verbs_in(VerbTier::Tier1)
        .iter()
        .chain(components.verbs_in(VerbTier::Tier2).iter())
        .collect();

    let analytical_count = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| {
            let lower = s.to_lowercase();
            functional.iter().any(|v| lower.contains(v.as_str()))
        })
        .count();

    let quality = (average_verb_quality(components) + average_effect_quality(components)) / 2.0;
    let insights = analytical_count as f64 * quality;

    let raw: f64 = if insights >= 4.0 {
        5.0
    } else if insights >= 3.0 {
        4.0
    } else if insights >= 2.0 {
        3.0
    } else if insights >= 1.0 {
        2.5
    } else {
        2.0
    };

    (raw.min(ceiling), insights)
}

/// Cohesion sub-metric: connector-category variety less a graduated
/// grammar penalty
///
/// Variety, not raw connector count, drives the base: repeating one
/// connector shows no structural range.
fn score_cohesion(components: &ExtractedComponents, grammar_errors: usize, ceiling: f64) -> f64 {
    let base: f64 = match components.connector_variety() {
        0 => 2.5,
        1 => 3.0,
        2 => 4.0,
        _ => 5.0,
    };

    let penalty = match grammar_errors {
        0..=2 => 0.0,
        3..=4 => 0.5,
        5..=6 => 1.0,
        _ => 1.5,
    };

    (base - penalty).max(2.0).min(ceiling)
}

/// Score one analytical document through the full rule-based path
pub fn score_analysis(
    text: &str,
    components: &ExtractedComponents,
    grammar: &dyn GrammarCheck,
) -> RuleScores {
    let (sm1, ceiling) = score_presence(components);
    let (sm2, insights) = score_depth(text, components, ceiling);
    let (error_count, issues) = grammar.count_errors(text);
    let sm3 = score_cohesion(components, error_count, ceiling);

    let result = ScoreResult::new(sm1, ceiling, sm2, sm3);
    debug!(
        sm1 = result.sm1,
        ceiling = result.ceiling,
        sm2 = result.sm2,
        sm3 = result.sm3,
        insights,
        grammar_errors = error_count,
        "analysis scoring complete"
    );

    RuleScores {
        result,
        distinct_insights: insights,
        grammar_error_count: error_count,
        grammar_issues: issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::PatternGrammar;
    use markwell_domain::{ConnectorKind, DetailQuality};
    use markwell_extractor::AnalysisExtractor;
    use markwell_taxonomy::AnalysisTaxonomy;
    use proptest::prelude::*;

    fn full_components() -> ExtractedComponents {
        let mut c = ExtractedComponents::empty();
        c.topics = vec!["narrator".to_string()];
        c.verbs = vec!["reveals".to_string()];
        c.verb_tiers
            .insert(VerbTier::Tier1, vec!["reveals".to_string()]);
        c.objects = vec!["distance".to_string()];
        c.details = vec!["the snow was cold".to_string()];
        c.effects = vec!["reveals how control works".to_string()];
        c.effect_tiers.insert(
            EffectTier::Tier2,
            vec!["reveals how control works".to_string()],
        );
        c.detail_quality = DetailQuality::Precise;
        c.detail_score = 5.0;
        c
    }

    #[test]
    fn test_full_presence_top_score() {
        let (sm1, ceiling) = score_presence(&full_components());
        assert!((sm1 - 5.0).abs() < 1e-9);
        assert!((ceiling - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_presence_floor_for_empty() {
        let (sm1, ceiling) = score_presence(&ExtractedComponents::empty());
        assert!((sm1 - 1.5).abs() < 1e-9);
        assert!((ceiling - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_vague_detail_caps_ceiling_at_three() {
        let mut c = full_components();
        c.detail_quality = DetailQuality::Vague;
        c.detail_score = 3.0;
        let (sm1, ceiling) = score_presence(&c);
        assert!((sm1 - 3.0).abs() < 1e-9);
        assert!((ceiling - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_depth_clamped_to_ceiling() {
        let mut c = full_components();
        c.detail_quality = DetailQuality::Vague;
        c.detail_score = 3.0;
        let text = "The narrator reveals control. The author reveals fear. \
                    The ending reveals loss. The tone reveals distance.";
        let scores = score_analysis(text, &c, &PatternGrammar::new());
        assert!(scores.result.sm2 <= scores.result.ceiling);
        assert!(scores.result.ceiling_holds());
    }

    #[test]
    fn test_cohesion_variety_drives_base() {
        let mut c = full_components();
        c.connectors
            .insert(ConnectorKind::Contrast, vec!["however".to_string()]);
        assert!((score_cohesion(&c, 0, 5.0) - 3.0).abs() < 1e-9);

        c.connectors
            .insert(ConnectorKind::CauseEffect, vec!["therefore".to_string()]);
        assert!((score_cohesion(&c, 0, 5.0) - 4.0).abs() < 1e-9);

        c.connectors
            .insert(ConnectorKind::Summary, vec!["overall".to_string()]);
        assert!((score_cohesion(&c, 0, 5.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_cohesion_penalty_band() {
        let c = full_components();
        assert!((score_cohesion(&c, 2, 5.0) - 2.5).abs() < 1e-9);
        assert!((score_cohesion(&c, 4, 5.0) - 2.0).abs() < 1e-9);
        assert!((score_cohesion(&c, 7, 5.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_floor_result() {
        let scores = score_analysis("", &ExtractedComponents::empty(), &PatternGrammar::new());
        assert!((scores.result.sm1 - 1.5).abs() < 1e-9);
        assert!((scores.result.ceiling - 2.0).abs() < 1e-9);
        assert!(scores.result.ceiling_holds());
    }

    #[test]
    fn test_extracted_components_score_end_to_end() {
        let extractor = AnalysisExtractor::new(AnalysisTaxonomy::standard());
        let grammar = PatternGrammar::new();

        let weak = "Good book.";
        let strong = "In chapter 19, the author writes \"he killed the smaller twin\" \
                      without hesitation, because the community hides it, which reveals \
                      how control works. However, Jonas finally sees it. Therefore the \
                      reader questions everything.";

        let weak_scores = score_analysis(weak, &extractor.extract(weak), &grammar);
        let strong_scores = score_analysis(strong, &extractor.extract(strong), &grammar);

        assert!(weak_scores.result.ceiling_holds());
        assert!(strong_scores.result.ceiling_holds());
        assert!(strong_scores.result.sm1 > weak_scores.result.sm1);
        assert!(strong_scores.result.overall > weak_scores.result.overall);
    }

    proptest! {
        /// sm2/sm3 never exceed the ceiling fixed by the presence lookup,
        /// whatever mix of components and grammar errors the text produces
        #[test]
        fn prop_ceiling_invariant(
            present in 0usize..=5,
            detail_idx in 0usize..7,
            analytical in 0usize..10,
            errors in 0usize..10,
            variety in 0usize..6,
        ) {
            let detail_scores = [2.0, 3.0, 4.0, 4.25, 4.5, 4.75, 5.0];
            let mut c = ExtractedComponents::empty();
            if present >= 1 { c.topics = vec!["narrator".to_string()]; }
            if present >= 2 {
                c.verbs = vec!["reveals".to_string()];
                c.verb_tiers.insert(VerbTier::Tier1, vec!["reveals".to_string()]);
            }
            if present >= 3 { c.objects = vec!["distance".to_string()]; }
            if present >= 4 { c.details = vec!["evidence".to_string()]; }
            if present >= 5 {
                c.effects = vec!["reveals how it works".to_string()];
                c.effect_tiers.insert(
                    EffectTier::Tier2,
                    vec!["reveals how it works".to_string()],
                );
            }
            c.detail_score = detail_scores[detail_idx];
            let kinds = [
                ConnectorKind::Addition,
                ConnectorKind::Contrast,
                ConnectorKind::CauseEffect,
                ConnectorKind::Elaboration,
                ConnectorKind::Exemplification,
                ConnectorKind::Summary,
            ];
            for kind in kinds.iter().take(variety) {
                c.connectors.insert(*kind, vec!["x".to_string()]);
            }

            let (sm1, ceiling) = score_presence(&c);
            let text = "The narrator reveals the cost. ".repeat(analytical);
            let (sm2, _) = score_depth(&text, &c, ceiling);
            let sm3 = score_cohesion(&c, errors, ceiling);
            let result = ScoreResult::new(sm1, ceiling, sm2, sm3);

            prop_assert!(result.ceiling_holds());
            prop_assert!(result.sm2 <= result.ceiling + 1e-9);
            prop_assert!(result.sm3 <= result.ceiling + 1e-9);
        }
    }
}
