//! Feedback generation for the analysis rubric

use crate::join_steps;
use markwell_domain::{
    keys, ConnectorKind, EffectTier, ExtractedComponents, Feedback, VerbTier,
};
use markwell_registry::Device;
use markwell_scorer::RuleScores;
use regex::Regex;

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Synthesize feedback for one analytical document
///
/// `device` is the registry entry matched for the document, when one was
/// identified; its function text is interpolated into the depth guidance.
pub fn analysis_feedback(
    text: &str,
    components: &ExtractedComponents,
    scores: &RuleScores,
    device: Option<&Device>,
) -> Feedback {
    let mut feedback = Feedback::new();
    presence_feedback(text, components, &mut feedback);
    depth_feedback(text, components, device, &mut feedback);
    cohesion_feedback(components, scores, &mut feedback);

    if let Some(device) = device {
        feedback.set(keys::DETECTED_DEVICE, device.name.clone());
        if !device.function.is_empty() {
            feedback.set(
                keys::DEVICE_GUIDANCE,
                format!("{}: {}", title_case(&device.name), device.function),
            );
        }
    }

    feedback
}

fn presence_feedback(text: &str, components: &ExtractedComponents, feedback: &mut Feedback) {
    let mut present = Vec::new();
    if !components.topics.is_empty() {
        present.push("Topic");
    }
    if !components.objects.is_empty() {
        present.push("Object");
    }
    if !components.details.is_empty() {
        present.push("Detail");
    }

    feedback.set(
        keys::SM1,
        format!(
            "You have {} components present. Your Details are {} ({:.2}/5).",
            present.join(", "),
            components.detail_quality.as_str(),
            components.detail_score
        ),
    );

    let mut steps = Vec::new();

    if components.detail_score < 4.0 {
        let has_quotes = Regex::new(r#""[^"]+""#)
            .expect("static feedback pattern is valid")
            .is_match(text);
        let has_attribution = Regex::new(r"(?i)(?:p\.|page)\s*\d+|chapter\s+\d+")
            .expect("static feedback pattern is valid")
            .is_match(text);
        let has_interpretive = Regex::new(
            r"(?:which|that|this)\s+(?:shows|reveals|demonstrates|suggests|indicates)",
        )
        .expect("static feedback pattern is valid")
        .is_match(&text.to_lowercase());

        let mut needs = Vec::new();
        if !has_quotes {
            needs.push("add quotation marks around exact text");
        }
        if !has_attribution {
            needs.push("add chapter/page reference");
        }
        if !has_interpretive {
            needs.push("add 'which reveals...' to show significance");
        }
        if !needs.is_empty() {
            steps.push(format!("Transform details by: {}", needs.join(", ")));
        }
    }

    let tier1 = components.verbs_in(VerbTier::Tier1);
    let tier2 = components.verbs_in(VerbTier::Tier2);
    let tier3 = components.verbs_in(VerbTier::Tier3);
    if tier1.is_empty() && tier2.is_empty() {
        if tier3.is_empty() {
            steps.push("Use analytical verbs like reveals, creates, exposes, challenges".to_string());
        } else {
            let examples: Vec<&str> = tier3.iter().take(5).map(String::as_str).collect();
            steps.push(format!(
                "Try using Tier 1 verbs (reveals, creates, exposes, challenges) instead of Tier 3 verbs ({})",
                examples.join(", ")
            ));
        }
    }

    feedback.set(
        keys::SM1_NEXT,
        join_steps(steps, "Continue developing specific textual details."),
    );
}

fn depth_feedback(
    text: &str,
    components: &ExtractedComponents,
    device: Option<&Device>,
    feedback: &mut Feedback,
) {
    let functional: Vec<&String> = components
        .verbs_in(VerbTier::Tier1)
        .iter()
        .chain(components.verbs_in(VerbTier::Tier2).iter())
        .collect();
    let attempts = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| {
            let lower = s.to_lowercase();
            functional.iter().any(|v| lower.contains(v.as_str()))
        })
        .count();

    feedback.set(
        keys::SM2,
        format!(
            "You make {} analytical attempts. Your effects focus on reader engagement.",
            attempts
        ),
    );

    let mut steps = Vec::new();

    if attempts < 3 {
        steps.push(
            "Build more distinct insights - each detail should unlock a DIFFERENT analytical point"
                .to_string(),
        );
    }

    if components.effects_in(EffectTier::Tier1).is_empty()
        && components.effects_in(EffectTier::Tier2).is_empty()
    {
        let device_name = device
            .map(|d| title_case(&d.name))
            .unwrap_or_else(|| "the device".to_string());
        steps.push(format!(
            "Push toward meaning production (Tier 2). Instead of generic effects, write: \
             '{device_name} reveals how the community...' or '{device_name} demonstrates that...'"
        ));
    }

    if let Some(device) = device {
        if !device.function.is_empty() {
            steps.push(format!(
                "Show how {} functions: {}",
                title_case(&device.name),
                device.function
            ));
        }
    }

    feedback.set(keys::SM2_NEXT, join_steps(steps, "Build more distinct insights."));
}

fn cohesion_feedback(
    components: &ExtractedComponents,
    scores: &RuleScores,
    feedback: &mut Feedback,
) {
    let variety = components.connector_variety();
    let total = components.connector_total();
    let errors = scores.grammar_error_count;

    let mut current = if variety > 0 {
        let summary: Vec<String> = components
            .connectors
            .iter()
            .take(4)
            .map(|(kind, found)| {
                let examples: Vec<&str> = found.iter().take(3).map(String::as_str).collect();
                format!("{} ({})", kind.as_str(), examples.join(", "))
            })
            .collect();
        format!(
            "You use {} connectors across {} types: {}. ",
            total,
            variety,
            summary.join("; ")
        )
    } else {
        format!("You use {} connectors across {} types. ", total, variety)
    };
    current.push_str(&format!("Approximately {} grammar issues detected.", errors));
    feedback.set(keys::SM3, current);

    let mut steps = Vec::new();

    if variety <= 1 {
        let mut missing = Vec::new();
        if !components.connectors.contains_key(&ConnectorKind::Contrast) {
            missing.push("contrast (however, although, whereas)");
        }
        if !components.connectors.contains_key(&ConnectorKind::CauseEffect) {
            missing.push("cause-effect (therefore, thus, consequently)");
        }
        if !components.connectors.contains_key(&ConnectorKind::Elaboration) {
            missing.push("elaboration (which, whereby)");
        }
        if !missing.is_empty() {
            let shown: Vec<&str> = missing.into_iter().take(2).collect();
            steps.push(format!("Add connector variety: {}", shown.join(", ")));
        }
    }

    if errors > 2 {
        steps.push(
            "Focus on reducing grammar issues, especially subject-verb agreement".to_string(),
        );
    } else if errors > 0 {
        steps.push(
            "Minor grammar cleanup needed (check subject-verb agreement, apostrophes)".to_string(),
        );
    }

    feedback.set(
        keys::SM3_NEXT,
        join_steps(steps, "Good connector variety! Focus on grammar cleanup."),
    );
}
