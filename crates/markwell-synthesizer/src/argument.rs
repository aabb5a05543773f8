//! Feedback generation for the argument rubric

use markwell_domain::{
    keys, ArgumentComponents, EvidenceQuality, Feedback, PositionStrength, ReasoningKind,
    ReasoningLayer,
};
use markwell_scorer::RuleScores;

/// Synthesize feedback for one argumentative document
pub fn argument_feedback(components: &ArgumentComponents, scores: &RuleScores) -> Feedback {
    let mut feedback = Feedback::new();
    position_feedback(components, &mut feedback);
    reasoning_feedback(components, &mut feedback);
    coherence_feedback(components, scores, &mut feedback);
    feedback.set(keys::LAYER_GUIDANCE, layer_guidance(components.reasoning_layer));
    feedback
}

fn position_feedback(components: &ArgumentComponents, feedback: &mut Feedback) {
    let current = match &components.position {
        None => "Your position is not clear. The reader cannot tell which side you are arguing."
            .to_string(),
        Some(position) => format!(
            "You take a clear position: {}. Your stance is {}. Your evidence is {}.",
            position,
            components.position_strength.as_str(),
            components.evidence_quality.as_str()
        ),
    };
    feedback.set(keys::SM1, current);

    let mut steps = Vec::new();

    match components.position_strength {
        PositionStrength::Missing => steps.push(
            "State your position clearly early in your response: \
             'I believe ... because...'"
                .to_string(),
        ),
        PositionStrength::Hedged => steps.push(
            "Strengthen your stance. Instead of 'maybe' or 'kind of,' use \
             'I believe' or 'It is clear that...'"
                .to_string(),
        ),
        _ => {}
    }

    match components.evidence_quality {
        EvidenceQuality::Missing | EvidenceQuality::Assertion => steps.push(
            "Add specific evidence. Name the exact scene or quote it, then explain \
             what it shows"
                .to_string(),
        ),
        EvidenceQuality::General => steps.push(
            "Make your evidence more specific. Replace 'he tried to help' with the \
             exact moment in the text where it happens"
                .to_string(),
        ),
        EvidenceQuality::Paraphrased => steps.push(
            "Consider adding a direct quote with a page reference to strengthen \
             your evidence"
                .to_string(),
        ),
        EvidenceQuality::Specific => {}
    }

    let next = if steps.is_empty() {
        "Good position clarity and evidence!".to_string()
    } else {
        format!("{}.", steps.join(". "))
    };
    feedback.set(keys::SM1_NEXT, next);
}

fn reasoning_feedback(components: &ArgumentComponents, feedback: &mut Feedback) {
    let layer = components.reasoning_layer;
    let ce_count = components.reasoning_of(ReasoningKind::CauseEffect).len();
    let comp_count = components.reasoning_of(ReasoningKind::Comparison).len();

    feedback.set(
        keys::SM2,
        format!(
            "Your argument reaches reasoning layer {}: {}. \
             You use {} cause-effect connections and {} comparisons.",
            layer.level(),
            layer.label(),
            ce_count,
            comp_count
        ),
    );

    let next = match layer {
        ReasoningLayer::None => {
            "First, state a clear position, then explain WHY your evidence supports it."
        }
        ReasoningLayer::LabelOnly => {
            "Move from labelling to comparison. You have stated a side; now show why \
             it is MORE true than the alternative: 'While he does ..., he ... MORE, therefore...'"
        }
        ReasoningLayer::Comparison => {
            "Move from comparison to cause-effect. You have weighed the alternatives; \
             now explain the CAUSE: 'Because ..., ... which caused ...'"
        }
        ReasoningLayer::CausalChain => {
            "To reach the top layer, frame the PURPOSE: explain what the text achieves \
             by presenting its subject this way."
        }
        ReasoningLayer::PurposeFraming => {
            "Excellent reasoning depth! To refine further, ensure each cause-effect \
             chain is supported by specific textual evidence."
        }
    };
    feedback.set(keys::SM2_NEXT, next);
}

fn coherence_feedback(
    components: &ArgumentComponents,
    _scores: &RuleScores,
    feedback: &mut Feedback,
) {
    let mut current = String::new();
    if components.counter_arguments.is_empty() {
        current.push_str("You don't acknowledge counter-arguments. ");
    } else {
        current.push_str("You acknowledge the other side, which strengthens your argument. ");
    }
    if components.synthesis.is_some() {
        current.push_str("You have a concluding synthesis that ties your argument together.");
    } else {
        current.push_str("Your conclusion could be stronger.");
    }
    feedback.set(keys::SM3, current);

    let mut steps = Vec::new();

    if components.counter_arguments.is_empty() {
        steps.push(
            "Acknowledge the other side: 'Although ... is true, ... outweighs it because...'"
                .to_string(),
        );
    }

    if components.synthesis.is_none() {
        steps.push(
            "Add a strong conclusion that weighs the evidence: 'Therefore, when we weigh \
             ... against ..., it becomes clear that...'"
                .to_string(),
        );
    } else if components.synthesis_score < 0.75 {
        steps.push(
            "Strengthen your conclusion by explicitly weighing the evidence on both sides"
                .to_string(),
        );
    }

    let next = if steps.is_empty() {
        "Good argument coherence!".to_string()
    } else {
        format!("{}.", steps.join(". "))
    };
    feedback.set(keys::SM3_NEXT, next);
}

fn layer_guidance(layer: ReasoningLayer) -> &'static str {
    match layer {
        ReasoningLayer::None => {
            "Your argument needs a clear foundation. Start by stating which side you \
             take, in one sentence the reader cannot miss."
        }
        ReasoningLayer::LabelOnly => {
            "You state a position. To reach the comparison layer, show why one side \
             outweighs the other rather than only naming it."
        }
        ReasoningLayer::Comparison => {
            "You distinguish between alternatives. To reach the cause-effect layer, \
             explain HOW your evidence creates the outcome you claim."
        }
        ReasoningLayer::CausalChain => {
            "You show how evidence supports your position. To reach the top layer, \
             frame the PURPOSE: what the text achieves by this configuration."
        }
        ReasoningLayer::PurposeFraming => {
            "Excellent argument structure! Ensure every claim is supported by specific \
             textual evidence and the counter-argument is integrated into your reasoning."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markwell_domain::ScoreResult;

    fn scores() -> RuleScores {
        RuleScores {
            result: ScoreResult::new(3.0, 3.0, 3.0, 3.0),
            distinct_insights: 0.0,
            grammar_error_count: 0,
            grammar_issues: Vec::new(),
        }
    }

    #[test]
    fn test_unclear_position_feedback() {
        let c = ArgumentComponents::empty();
        let fb = argument_feedback(&c, &scores());
        assert!(fb.get(keys::SM1).unwrap().contains("not clear"));
        assert!(fb.get(keys::SM1_NEXT).unwrap().contains("State your position"));
    }

    #[test]
    fn test_clear_position_summarized() {
        let mut c = ArgumentComponents::empty();
        c.position = Some("victim".to_string());
        c.position_strength = PositionStrength::Strong;
        c.evidence_quality = EvidenceQuality::Paraphrased;
        let fb = argument_feedback(&c, &scores());
        let sm1 = fb.get(keys::SM1).unwrap();
        assert!(sm1.contains("victim"));
        assert!(sm1.contains("strong"));
        assert!(sm1.contains("paraphrased"));
        assert!(fb.get(keys::SM1_NEXT).unwrap().contains("direct quote"));
    }

    #[test]
    fn test_layer_guidance_tracks_layer() {
        let mut c = ArgumentComponents::empty();
        c.reasoning_layer = ReasoningLayer::Comparison;
        let fb = argument_feedback(&c, &scores());
        assert!(fb.get(keys::LAYER_GUIDANCE).unwrap().contains("cause-effect layer"));
        assert!(fb.get(keys::SM2).unwrap().contains("layer 2"));
    }

    #[test]
    fn test_missing_counter_and_synthesis_guidance() {
        let c = ArgumentComponents::empty();
        let fb = argument_feedback(&c, &scores());
        let next = fb.get(keys::SM3_NEXT).unwrap();
        assert!(next.contains("Acknowledge the other side"));
        assert!(next.contains("weighs the evidence"));
    }

    #[test]
    fn test_complete_argument_praised() {
        let mut c = ArgumentComponents::empty();
        c.position = Some("hero".to_string());
        c.position_strength = PositionStrength::Strong;
        c.evidence_quality = EvidenceQuality::Specific;
        c.counter_arguments = vec!["however some might disagree".to_string()];
        c.synthesis = Some("ultimately he is a hero".to_string());
        c.synthesis_score = 1.0;
        let fb = argument_feedback(&c, &scores());
        assert_eq!(fb.get(keys::SM1_NEXT), Some("Good position clarity and evidence!"));
        assert_eq!(fb.get(keys::SM3_NEXT), Some("Good argument coherence!"));
    }
}
