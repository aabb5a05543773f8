//! Engine orchestration
//!
//! The engine wires the layers together: extraction, device identification,
//! rule-based scoring, the optional external scoring step, and feedback
//! synthesis. Evaluation never fails; degenerate input lands on the scoring
//! floors and the external path falls back explicitly.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::output::{ComponentSummary, EvaluateOptions, Evaluation, ScoreOrigin};
use markwell_domain::{
    ArgumentComponents, EvaluationId, ExternalOutcome, ExternalScoreRequest, ExternalScorer,
    ExtractedComponents, Rubric, ScoreResult,
};
use markwell_extractor::{AnalysisExtractor, ArgumentExtractor};
use markwell_registry::DeviceRegistry;
use markwell_scorer::{score_analysis, score_argument, ArgumentGrammar, PatternGrammar};
use markwell_synthesizer::{analysis_feedback, argument_feedback};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// The structured assessment engine
///
/// Holds the compiled taxonomies, the device registry, the grammar
/// batteries, and (optionally) an external scorer. All state is fixed at
/// construction; evaluation is a pure function of the input text plus that
/// state, so one engine can be shared freely across threads of work.
pub struct Engine {
    config: EngineConfig,
    analysis_extractor: AnalysisExtractor,
    argument_extractor: ArgumentExtractor,
    registry: DeviceRegistry,
    analysis_grammar: PatternGrammar,
    argument_grammar: ArgumentGrammar,
    external: Option<Box<dyn ExternalScorer>>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("analysis_extractor", &self.analysis_extractor)
            .field("argument_extractor", &self.argument_extractor)
            .field("registry", &self.registry)
            .field("analysis_grammar", &self.analysis_grammar)
            .field("argument_grammar", &self.argument_grammar)
            .field("external", &self.external.as_ref().map(|_| "dyn ExternalScorer"))
            .finish()
    }
}

/// External scores after substitution, ready to merge into the evaluation
struct ExternalApplied {
    result: ScoreResult,
    detail_quality: Option<String>,
    feedback_fields: BTreeMap<String, String>,
}

impl Engine {
    /// Build an engine from a configuration
    ///
    /// Validates the configuration and compiles both taxonomies; this is
    /// the only point where taxonomy patterns can fail.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::Config)?;

        let analysis_taxonomy = config.analysis_taxonomy.clone().compile()?;
        let argument_taxonomy = config.argument_taxonomy.clone().compile()?;

        Ok(Self {
            config,
            analysis_extractor: AnalysisExtractor::new(analysis_taxonomy),
            argument_extractor: ArgumentExtractor::new(argument_taxonomy),
            registry: DeviceRegistry::new(),
            analysis_grammar: PatternGrammar::new(),
            argument_grammar: ArgumentGrammar::new(),
            external: None,
        })
    }

    /// Attach an external scorer
    ///
    /// The scorer is consulted only when the configuration enables it.
    pub fn with_external_scorer(mut self, scorer: Box<dyn ExternalScorer>) -> Self {
        self.external = Some(scorer);
        self
    }

    /// Load the device registry from knowledge-base JSON text
    ///
    /// Replaces any previously loaded registry and re-seeds the alias table
    /// from the analysis taxonomy. Returns the number of devices loaded.
    pub fn load_registry(&mut self, raw_json: &str) -> Result<usize, EngineError> {
        let mut registry = DeviceRegistry::from_json_str(raw_json)?;
        registry.set_aliases(
            self.analysis_extractor
                .taxonomy()
                .device_aliases()
                .to_vec(),
        );
        self.registry = registry;
        Ok(self.registry.len())
    }

    /// Load the device registry from a knowledge-base JSON file
    pub fn load_registry_from_path(&mut self, path: impl AsRef<Path>) -> Result<usize, EngineError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            EngineError::Registry(markwell_registry::RegistryError::Io {
                path: path.as_ref().display().to_string(),
                source,
            })
        })?;
        self.load_registry(&raw)
    }

    /// The loaded device registry
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// The engine's configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Extract analysis components without scoring
    pub fn extract(&self, text: &str) -> ExtractedComponents {
        self.analysis_extractor.extract(&self.bounded(text))
    }

    /// Extract argument components without scoring
    pub fn extract_argument(&self, text: &str) -> ArgumentComponents {
        self.argument_extractor.extract(&self.bounded(text))
    }

    /// Grade one document
    pub fn evaluate(&self, text: &str, options: &EvaluateOptions) -> Evaluation {
        let text = self.bounded(text);
        info!(
            rubric = options.rubric.as_str(),
            chars = text.len(),
            "starting evaluation"
        );

        match options.rubric {
            Rubric::Analysis => self.evaluate_analysis(&text, options),
            Rubric::Argument => self.evaluate_argument(&text, options),
        }
    }

    /// Grade a batch of documents under one set of options
    pub fn evaluate_batch<'a, I>(&self, texts: I, options: &EvaluateOptions) -> Vec<Evaluation>
    where
        I: IntoIterator<Item = &'a str>,
    {
        texts
            .into_iter()
            .map(|text| self.evaluate(text, options))
            .collect()
    }

    fn evaluate_analysis(&self, text: &str, options: &EvaluateOptions) -> Evaluation {
        let components = self.analysis_extractor.extract(text);

        let device = self
            .registry
            .identify_device(text, &components.topics)
            .and_then(|name| self.registry.get(&name).cloned());
        if let Some(device) = &device {
            debug!(device = %device.name, "device identified");
        }

        let rule = score_analysis(text, &components, &self.analysis_grammar);
        let mut feedback = analysis_feedback(text, &components, &rule, device.as_ref());
        let mut summary = ComponentSummary::from_analysis(&components);

        let (origin, fallback_reason, scores) =
            match self.try_external(text, Rubric::Analysis, summarize_analysis(&components)) {
                Ok(Some(applied)) => {
                    if let Some(label) = &applied.detail_quality {
                        if let ComponentSummary::Analysis { detail_quality, .. } = &mut summary {
                            *detail_quality = label.clone();
                        }
                    }
                    for (key, value) in &applied.feedback_fields {
                        feedback.set_if_absent(key.clone(), value.clone());
                    }
                    (ScoreOrigin::External, None, applied.result)
                }
                Ok(None) => (ScoreOrigin::Rule, None, rule.result),
                Err(reason) => {
                    warn!(reason = %reason, "external scorer unavailable, using rule-based scores");
                    (ScoreOrigin::Rule, Some(reason), rule.result)
                }
            };

        Evaluation {
            id: EvaluationId::new().to_string(),
            rubric: Rubric::Analysis,
            origin,
            fallback_reason,
            scores,
            components: summary,
            feedback,
            meta: options.meta.clone(),
        }
    }

    fn evaluate_argument(&self, text: &str, options: &EvaluateOptions) -> Evaluation {
        let components = self.argument_extractor.extract(text);
        let taxonomy = self.argument_extractor.taxonomy();

        let rule = score_argument(text, &components, taxonomy, &self.argument_grammar);
        let mut feedback = argument_feedback(&components, &rule);
        let summary = ComponentSummary::from_argument(&components);

        let (origin, fallback_reason, scores) =
            match self.try_external(text, Rubric::Argument, summarize_argument(&components)) {
                Ok(Some(applied)) => {
                    for (key, value) in &applied.feedback_fields {
                        feedback.set_if_absent(key.clone(), value.clone());
                    }
                    (ScoreOrigin::External, None, applied.result)
                }
                Ok(None) => (ScoreOrigin::Rule, None, rule.result),
                Err(reason) => {
                    warn!(reason = %reason, "external scorer unavailable, using rule-based scores");
                    (ScoreOrigin::Rule, Some(reason), rule.result)
                }
            };

        Evaluation {
            id: EvaluationId::new().to_string(),
            rubric: Rubric::Argument,
            origin,
            fallback_reason,
            scores,
            components: summary,
            feedback,
            meta: options.meta.clone(),
        }
    }

    /// Run the external scoring step, when configured
    ///
    /// `Ok(None)` means the step is not in play; `Err` carries the fallback
    /// reason. Substituted scores pass through `ScoreResult::new`, which
    /// re-clamps sm2 and sm3 to the reported ceiling.
    fn try_external(
        &self,
        text: &str,
        rubric: Rubric,
        extraction_summary: String,
    ) -> Result<Option<ExternalApplied>, String> {
        if !self.config.use_external_scorer {
            return Ok(None);
        }
        let Some(scorer) = &self.external else {
            return Ok(None);
        };

        let request = ExternalScoreRequest {
            text: text.to_string(),
            rubric,
            extraction_summary,
        };

        match scorer.score(&request) {
            ExternalOutcome::Scored(score) => {
                let result = ScoreResult::new(score.sm1, score.ceiling, score.sm2, score.sm3);
                Ok(Some(ExternalApplied {
                    result,
                    detail_quality: score.detail_quality,
                    feedback_fields: score.feedback_fields,
                }))
            }
            ExternalOutcome::Unavailable { reason } => Err(reason),
        }
    }

    fn bounded<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let limit = self.config.max_text_length;
        if text.chars().count() <= limit {
            return Cow::Borrowed(text);
        }
        warn!(limit, "input exceeds maximum length, truncating");
        Cow::Owned(text.chars().take(limit).collect())
    }
}

fn join_or_none(items: &[String], limit: usize, separator: &str) -> String {
    if items.is_empty() {
        "None detected".to_string()
    } else {
        items
            .iter()
            .take(limit)
            .cloned()
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Condense analysis components into the external-scorer prompt summary
fn summarize_analysis(components: &ExtractedComponents) -> String {
    let connectors = if components.connectors.is_empty() {
        "None detected".to_string()
    } else {
        components
            .connectors
            .iter()
            .map(|(kind, found)| format!("{}: {}", kind.as_str(), found.join(", ")))
            .collect::<Vec<_>>()
            .join("; ")
    };

    format!(
        "Topics: {}\nVerbs: {}\nDetails: {}\nEffects: {}\nConnectors: {}",
        join_or_none(&components.topics, 10, ", "),
        join_or_none(&components.verbs, 10, ", "),
        join_or_none(&components.details, 5, "; "),
        join_or_none(&components.effects, 3, "; "),
        connectors,
    )
}

/// Condense argument components into the external-scorer prompt summary
fn summarize_argument(components: &ArgumentComponents) -> String {
    let position = match &components.position {
        Some(position) => format!("{} ({})", position, components.position_strength.as_str()),
        None => "None detected".to_string(),
    };

    format!(
        "Position: {}\nEvidence: {}\nReasoning: {}\nCounter-arguments: {}\nSynthesis: {}",
        position,
        join_or_none(&components.evidence_items, 5, "; "),
        join_or_none(&components.reasoning_chains, 5, "; "),
        join_or_none(&components.counter_arguments, 3, "; "),
        components.synthesis.as_deref().unwrap_or("None detected"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use markwell_domain::ConnectorKind;

    #[test]
    fn test_engine_builds_from_default_config() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        assert!(engine.registry().is_empty());
        assert!(!engine.config().use_external_scorer);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.max_text_length = 0;
        let err = Engine::new(config).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_truncation_keeps_prefix() {
        let mut config = EngineConfig::default();
        config.max_text_length = 10;
        let engine = Engine::new(config).unwrap();
        assert_eq!(engine.bounded("abcdefghijKLMNOP"), "abcdefghij");
        assert_eq!(engine.bounded("short"), "short");
    }

    #[test]
    fn test_analysis_summary_format() {
        let mut c = ExtractedComponents::empty();
        c.topics = vec!["narrator".to_string(), "memory".to_string()];
        c.verbs = vec!["reveals".to_string()];
        c.connectors.insert(
            ConnectorKind::Contrast,
            vec!["however".to_string()],
        );

        let summary = summarize_analysis(&c);
        assert!(summary.contains("Topics: narrator, memory"));
        assert!(summary.contains("Verbs: reveals"));
        assert!(summary.contains("Details: None detected"));
        assert!(summary.contains("Connectors: contrast: however"));
    }

    #[test]
    fn test_argument_summary_format() {
        let mut c = ArgumentComponents::empty();
        c.position = Some("victim".to_string());
        c.evidence_items = vec!["he pedaled harder".to_string()];

        let summary = summarize_argument(&c);
        assert!(summary.contains("Position: victim (missing)"));
        assert!(summary.contains("Evidence: he pedaled harder"));
        assert!(summary.contains("Synthesis: None detected"));
    }

    #[test]
    fn test_summary_limits_applied() {
        let mut c = ExtractedComponents::empty();
        c.topics = (0..15).map(|i| format!("topic{}", i)).collect();

        let summary = summarize_analysis(&c);
        assert!(summary.contains("topic9"));
        assert!(!summary.contains("topic10"));
    }
}
