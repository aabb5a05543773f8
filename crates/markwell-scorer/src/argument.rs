//! Scoring for the argument rubric

use crate::RuleScores;
use markwell_domain::{
    ArgumentComponents, EvidenceQuality, GrammarCheck, PositionStrength, ReasoningLayer,
    ScoreResult,
};
use markwell_taxonomy::ArgumentTaxonomy;
use tracing::debug;

// Word-count caps: very short responses cannot demonstrate full depth
const SHORT_TEXT_WORDS: usize = 50;
const SHORT_TEXT_CAP: f64 = 3.0;
const MEDIUM_TEXT_WORDS: usize = 100;
const MEDIUM_TEXT_CAP: f64 = 4.0;

const CONTRADICTION_PENALTY: f64 = 0.5;
const SCORE_FLOOR: f64 = 1.5;

/// Presence sub-metric: position clarity plus evidence quality
///
/// Position contributes up to 2 points, evidence up to 3 with a quantity
/// adjustment (single-item penalty, small capped bonus from four items);
/// the combined raw score maps through the fixed lookup to (sm1, ceiling).
pub(crate) fn score_presence(components: &ArgumentComponents) -> (f64, f64) {
    let mut position_points = 0.0;
    if components.position.is_some() {
        position_points += 1.0;
        position_points += match components.position_strength {
            PositionStrength::Strong | PositionStrength::Moderate => 1.0,
            PositionStrength::Implicit => 0.5,
            PositionStrength::Hedged | PositionStrength::Missing => 0.0,
        };
    }

    let mut evidence_points: f64 = match components.evidence_quality {
        EvidenceQuality::Specific => 3.0,
        EvidenceQuality::Paraphrased => 2.0,
        EvidenceQuality::General => 1.0,
        EvidenceQuality::Assertion => 0.5,
        EvidenceQuality::Missing => 0.0,
    };

    let evidence_count = components.evidence_items.len();
    if evidence_count < 2 {
        evidence_points *= 0.7;
    } else if evidence_count >= 4 {
        evidence_points = (evidence_points * 1.1).min(3.0);
    }

    let raw = position_points + evidence_points;

    if raw >= 4.5 {
        (5.0, 5.0)
    } else if raw >= 4.0 {
        (4.5, 4.5)
    } else if raw >= 3.5 {
        (4.0, 4.0)
    } else if raw >= 3.0 {
        (3.5, 4.0)
    } else if raw >= 2.0 {
        (3.0, 3.0)
    } else if raw >= 1.0 {
        (2.0, 2.5)
    } else {
        (1.5, 2.0)
    }
}

fn layer_base(layer: ReasoningLayer) -> f64 {
    match layer {
        ReasoningLayer::None => 1.5,
        ReasoningLayer::LabelOnly => 2.5,
        ReasoningLayer::Comparison => 3.5,
        ReasoningLayer::CausalChain => 4.0,
        ReasoningLayer::PurposeFraming => 5.0,
    }
}

/// Depth sub-metric: reasoning layer reached, adjusted for distinct
/// reasoning moves, text length, and self-contradiction
fn score_depth(
    text: &str,
    components: &ArgumentComponents,
    taxonomy: &ArgumentTaxonomy,
    ceiling: f64,
) -> f64 {
    let mut base = layer_base(components.reasoning_layer);

    let word_count = text.split_whitespace().count();
    if word_count < SHORT_TEXT_WORDS {
        base = base.min(SHORT_TEXT_CAP);
    } else if word_count < MEDIUM_TEXT_WORDS {
        base = base.min(MEDIUM_TEXT_CAP);
    }

    let text_lower = text.to_lowercase();
    if taxonomy
        .contradiction_checks()
        .iter()
        .any(|c| c.is_contradicted(&text_lower))
    {
        debug!("self-contradicting stance, depth penalized");
        base -= CONTRADICTION_PENALTY;
    }

    let depth_bonus = match components.distinct_reasoning_chains() {
        0..=1 => 0.0,
        2..=3 => 0.25,
        _ => 0.5,
    };

    (base + depth_bonus).clamp(SCORE_FLOOR, ceiling)
}

/// Cohesion sub-metric: counter-acknowledgment, synthesis, flow markers,
/// less the grammar penalty
fn score_cohesion(
    text: &str,
    components: &ArgumentComponents,
    taxonomy: &ArgumentTaxonomy,
    grammar_errors: usize,
    ceiling: f64,
) -> f64 {
    let mut score = 2.0;
    score += components.counter_score;
    score += components.synthesis_score;

    let flow_count = taxonomy.flow_markers().match_count(&text.to_lowercase());
    score += match flow_count {
        0..=1 => 0.0,
        2 => 0.25,
        _ => 0.5,
    };

    score -= match grammar_errors {
        0..=3 => 0.0,
        4..=5 => 0.5,
        _ => 1.0,
    };

    score.clamp(SCORE_FLOOR, ceiling)
}

/// Score one argumentative document through the full rule-based path
pub fn score_argument(
    text: &str,
    components: &ArgumentComponents,
    taxonomy: &ArgumentTaxonomy,
    grammar: &dyn GrammarCheck,
) -> RuleScores {
    let (sm1, ceiling) = score_presence(components);
    let sm2 = score_depth(text, components, taxonomy, ceiling);
    let (error_count, issues) = grammar.count_errors(text);
    let sm3 = score_cohesion(text, components, taxonomy, error_count, ceiling);

    let result = ScoreResult::new(sm1, ceiling, sm2, sm3);
    debug!(
        sm1 = result.sm1,
        ceiling = result.ceiling,
        sm2 = result.sm2,
        sm3 = result.sm3,
        layer = components.reasoning_layer.level(),
        grammar_errors = error_count,
        "argument scoring complete"
    );

    RuleScores {
        result,
        distinct_insights: components.distinct_reasoning_chains() as f64,
        grammar_error_count: error_count,
        grammar_issues: issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ArgumentGrammar;
    use markwell_domain::EvidenceKind;
    use markwell_extractor::ArgumentExtractor;

    fn strong_components() -> ArgumentComponents {
        let mut c = ArgumentComponents::empty();
        c.position = Some("hero".to_string());
        c.position_strength = PositionStrength::Strong;
        c.position_score = 1.0;
        c.evidence_items = vec![
            "he pedaled harder through the snow".to_string(),
            "this is shown when he leaves".to_string(),
        ];
        c.evidence_kinds.insert(
            EvidenceKind::SpecificTextual,
            vec!["he pedaled harder through the snow".to_string()],
        );
        c.evidence_kinds.insert(
            EvidenceKind::Paraphrased,
            vec!["this is shown when he leaves".to_string()],
        );
        c.evidence_quality = EvidenceQuality::Specific;
        c.evidence_score = 0.5;
        c
    }

    #[test]
    fn test_presence_full_marks() {
        let (sm1, ceiling) = score_presence(&strong_components());
        // 2.0 position + 3.0 evidence (two items, no quantity adjustment)
        assert!((sm1 - 5.0).abs() < 1e-9);
        assert!((ceiling - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_evidence_penalty() {
        let mut c = strong_components();
        c.evidence_items.truncate(1);
        // 2.0 + 3.0*0.7 = 4.1 -> (4.5, 4.5)
        let (sm1, ceiling) = score_presence(&c);
        assert!((sm1 - 4.5).abs() < 1e-9);
        assert!((ceiling - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_presence_floor_for_empty() {
        let (sm1, ceiling) = score_presence(&ArgumentComponents::empty());
        assert!((sm1 - 1.5).abs() < 1e-9);
        assert!((ceiling - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_extracted_components_score_end_to_end() {
        let taxonomy = ArgumentTaxonomy::standard();
        let extractor = ArgumentExtractor::new(ArgumentTaxonomy::standard());
        let grammar = ArgumentGrammar::new();

        let bare = "He is a victim.";
        let developed = "I believe Jonas is more of a hero than a victim because he \
                         saves Gabriel. However, some might say he abandons his \
                         community. Ultimately his courage outweighs the harm.";

        let bare_scores = score_argument(bare, &extractor.extract(bare), &taxonomy, &grammar);
        assert!((bare_scores.result.sm1 - 2.0).abs() < 1e-9);
        assert!((bare_scores.result.ceiling - 2.5).abs() < 1e-9);

        let developed_scores =
            score_argument(developed, &extractor.extract(developed), &taxonomy, &grammar);
        assert!(developed_scores.result.ceiling_holds());
        assert!(developed_scores.result.sm1 > bare_scores.result.sm1);
    }

    #[test]
    fn test_short_text_caps_depth() {
        let mut c = strong_components();
        c.reasoning_layer = ReasoningLayer::PurposeFraming;
        let taxonomy = ArgumentTaxonomy::standard();
        let short = "Jonas is a hero because he saves Gabriel.";
        let sm2 = score_depth(short, &c, &taxonomy, 5.0);
        assert!(sm2 <= SHORT_TEXT_CAP + 1e-9);
    }

    #[test]
    fn test_contradiction_penalty_applied() {
        let mut c = strong_components();
        c.reasoning_layer = ReasoningLayer::CausalChain;
        let taxonomy = ArgumentTaxonomy::standard();
        let filler = "He walks through the town and thinks about things every single day. "
            .repeat(8);
        let clean = format!("{filler}Jonas is a victim of the community.");
        let contradictory =
            format!("{filler}Jonas is a victim. He is not really a victim of anything.");
        let clean_sm2 = score_depth(&clean, &c, &taxonomy, 5.0);
        let penalized_sm2 = score_depth(&contradictory, &c, &taxonomy, 5.0);
        assert!((clean_sm2 - penalized_sm2 - CONTRADICTION_PENALTY).abs() < 1e-9);
    }

    #[test]
    fn test_cohesion_rewards_counter_and_synthesis() {
        let mut c = strong_components();
        c.counter_score = 1.0;
        c.synthesis_score = 1.0;
        let taxonomy = ArgumentTaxonomy::standard();
        let sm3 = score_cohesion("plain text", &c, &taxonomy, 0, 5.0);
        assert!((sm3 - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_flow_marker_bonus() {
        let c = strong_components();
        let taxonomy = ArgumentTaxonomy::standard();
        let text = "Firstly he saves the baby. Secondly he keeps the memories. Finally he leaves.";
        let sm3 = score_cohesion(text, &c, &taxonomy, 0, 5.0);
        assert!((sm3 - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_heavy_grammar_errors_cost_a_full_point() {
        let c = strong_components();
        let taxonomy = ArgumentTaxonomy::standard();
        let light = score_cohesion("text", &c, &taxonomy, 4, 5.0);
        let heavy = score_cohesion("text", &c, &taxonomy, 6, 5.0);
        assert!((light - 1.5).abs() < 1e-9);
        assert!((heavy - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_full_path_respects_ceiling() {
        let mut c = strong_components();
        c.evidence_quality = EvidenceQuality::General;
        c.reasoning_layer = ReasoningLayer::PurposeFraming;
        c.counter_score = 1.0;
        c.synthesis_score = 1.0;
        let taxonomy = ArgumentTaxonomy::standard();
        let text = "He suffers because the community controls him. ".repeat(25);
        let scores = score_argument(text.trim(), &c, &taxonomy, &ArgumentGrammar::new());
        assert!(scores.result.ceiling_holds());
        assert!(scores.result.sm2 <= scores.result.ceiling);
    }
}
