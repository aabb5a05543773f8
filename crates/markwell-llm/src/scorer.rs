//! External rubric scoring over an LLM provider
//!
//! `RubricScorer` adapts any `LlmProvider` into the engine's `ExternalScorer`
//! seam. It builds a condensed rubric prompt around the student text and the
//! rule-based extraction summary, makes a single generation call, and parses
//! a strict JSON response. Anything that goes wrong — provider failure,
//! non-JSON output, missing score keys — becomes
//! `ExternalOutcome::Unavailable` with a reason; this function never panics
//! and never propagates an error type.
//!
//! One asymmetry is deliberate: when the rule extractor found a substantial
//! direct quote but the model rated details as "vague", the rule evidence
//! wins. The detail rating is promoted to "specific" and the ceiling and
//! presence score are raised to at least 4.0 before the scores are handed
//! back.

use crate::LlmError;
use markwell_domain::{
    ExternalOutcome, ExternalScore, ExternalScoreRequest, ExternalScorer, LlmProvider, Rubric,
};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::{debug, warn};

const ANALYSIS_RUBRIC_BRIEF: &str = "\
Sub-metric 1 (presence and quality): are Topic, analytical Verb, Object, \
Detail, and Effect all present? Detail quality sets the grade ceiling: \
missing details cap the grade at 2, vague details at 3, specific details \
(quotes or named moments) at 4, precise details (quote + chapter/page \
reference + context) allow 5.
Sub-metric 2 (analytical depth): how many DISTINCT insights does the writing \
build, and do its verbs and effects do analytical work (reveals, exposes, \
creates tension) rather than summary work (is, has, shows)?
Sub-metric 3 (cohesion): connector variety across contrast, cause-effect, \
and elaboration, discounted for grammar errors.";

const ARGUMENT_RUBRIC_BRIEF: &str = "\
Sub-metric 1 (position and evidence): is a clear position taken and stated \
strongly, and is it backed by specific textual evidence (quotes, named \
scenes) rather than bare assertion? Position clarity and evidence quality \
set the grade ceiling.
Sub-metric 2 (reasoning depth): does the argument only label a side, compare \
alternatives, build cause-effect chains, or frame the author's purpose? \
Higher layers score higher; internal contradictions are penalized.
Sub-metric 3 (coherence): counter-argument acknowledgement, a concluding \
synthesis that weighs both sides, and argumentative flow markers, discounted \
for grammar errors.";

/// Scores a document by prompting an LLM with the rubric and parsing its
/// JSON reply
///
/// Wraps any provider; the engine only sees the `ExternalScorer` trait.
pub struct RubricScorer<P> {
    provider: P,
}

impl<P> RubricScorer<P>
where
    P: LlmProvider,
    P::Error: Display,
{
    /// Create a scorer over the given provider
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Access the wrapped provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn build_prompt(&self, request: &ExternalScoreRequest) -> String {
        let brief = match request.rubric {
            Rubric::Analysis => ANALYSIS_RUBRIC_BRIEF,
            Rubric::Argument => ARGUMENT_RUBRIC_BRIEF,
        };

        format!(
            "You are grading one piece of student writing against a fixed rubric.\n\
             \n\
             RUBRIC ({rubric}):\n\
             {brief}\n\
             \n\
             STUDENT RESPONSE:\n\
             {text}\n\
             \n\
             RULE-BASED EXTRACTION (use as anchors, not as the verdict):\n\
             {summary}\n\
             \n\
             Respond with JSON only, no prose before or after. Use exactly these keys:\n\
             {{\"sm1_score\": <1.5-5>, \"detail_quality\": \"<missing|vague|specific|precise>\", \
             \"ceiling\": <2-5>, \"sm2_score\": <1.5-5>, \"sm3_score\": <1.5-5>, \
             \"feedback\": {{\"sm1_current\": \"...\", \"sm1_next\": \"...\", \
             \"sm2_current\": \"...\", \"sm2_next\": \"...\", \
             \"sm3_current\": \"...\", \"sm3_next\": \"...\"}}, \
             \"one_line_fix\": \"...\"}}\n\
             sm2_score and sm3_score must not exceed ceiling.",
            rubric = request.rubric.as_str(),
            brief = brief,
            text = request.text,
            summary = request.extraction_summary,
        )
    }
}

impl<P> ExternalScorer for RubricScorer<P>
where
    P: LlmProvider,
    P::Error: Display,
{
    fn score(&self, request: &ExternalScoreRequest) -> ExternalOutcome {
        let prompt = self.build_prompt(request);

        let raw = match self.provider.generate(&prompt) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(rubric = request.rubric.as_str(), error = %e, "external scorer unavailable");
                return ExternalOutcome::unavailable(format!("provider error: {}", e));
            }
        };

        match parse_response(&raw, &request.text) {
            Ok(score) => {
                debug!(
                    rubric = request.rubric.as_str(),
                    sm1 = score.sm1,
                    ceiling = score.ceiling,
                    "external score parsed"
                );
                ExternalOutcome::Scored(score)
            }
            Err(e) => {
                warn!(rubric = request.rubric.as_str(), error = %e, "external response rejected");
                ExternalOutcome::unavailable(e.to_string())
            }
        }
    }
}

/// Strip a markdown code fence from a model reply, if one wraps it
fn strip_fences(raw: &str) -> Result<&str, LlmError> {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return Ok(trimmed);
    }

    let inner = trimmed
        .split("```")
        .nth(1)
        .ok_or_else(|| LlmError::InvalidResponse("Unterminated code fence".to_string()))?;
    let inner = inner.trim_start();
    Ok(inner.strip_prefix("json").unwrap_or(inner).trim())
}

fn required_f64(value: &Value, key: &str) -> Result<f64, LlmError> {
    value
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| LlmError::InvalidResponse(format!("Missing numeric field: {}", key)))
}

/// Parse the model's JSON reply into an `ExternalScore`
///
/// `text` is the student text the request was built from; it is consulted
/// for the quote override only.
fn parse_response(raw: &str, text: &str) -> Result<ExternalScore, LlmError> {
    let body = strip_fences(raw)?;
    let value: Value = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Not valid JSON: {}", e)))?;

    let mut sm1 = required_f64(&value, "sm1_score")?;
    let mut ceiling = required_f64(&value, "ceiling")?;
    let sm2 = required_f64(&value, "sm2_score")?;
    let sm3 = required_f64(&value, "sm3_score")?;

    let mut detail_quality = value
        .get("detail_quality")
        .and_then(Value::as_str)
        .map(|s| s.to_lowercase());

    // A substantial verbatim quote is hard rule evidence; it overrides a
    // model "vague" rating, which in practice means the model skimmed.
    let long_quote = Regex::new(r#""[^"]{10,}""#).expect("static quote pattern is valid");
    if detail_quality.as_deref() == Some("vague") && long_quote.is_match(text) {
        warn!("quoted evidence found in text; overriding vague detail rating");
        detail_quality = Some("specific".to_string());
        ceiling = ceiling.max(4.0);
        sm1 = sm1.max(4.0);
    }

    let mut feedback_fields = BTreeMap::new();
    if let Some(feedback) = value.get("feedback").and_then(Value::as_object) {
        for (key, entry) in feedback {
            if let Some(entry) = entry.as_str() {
                let key = key.strip_suffix("_current").unwrap_or(key);
                feedback_fields.insert(key.to_string(), entry.to_string());
            }
        }
    }
    if let Some(obj) = value.as_object() {
        for (key, entry) in obj {
            if key == "one_line_fix" || key.ends_with("_reasoning") {
                if let Some(entry) = entry.as_str() {
                    feedback_fields.insert(key.clone(), entry.to_string());
                }
            }
        }
    }

    Ok(ExternalScore {
        sm1,
        ceiling,
        sm2,
        sm3,
        detail_quality,
        feedback_fields,
    })
}
