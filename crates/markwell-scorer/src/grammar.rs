//! Fixed grammar-error batteries behind the `GrammarCheck` seam
//!
//! Two batteries: one tuned to analytical prose, one to argumentative
//! prose. Both are pattern lists over observed student mistakes, not
//! parsers; swapping in a real checker only requires a new `GrammarCheck`
//! implementation.

use markwell_domain::GrammarCheck;
use regex::{Regex, RegexBuilder};

fn ci(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("static grammar pattern is valid")
}

fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Grammar battery for analytical writing
///
/// Checks subject-verb agreement, awkward phrasings, sentence fragments,
/// and run-ons. Run-ons count half an error each.
#[derive(Debug, Clone)]
pub struct PatternGrammar {
    agreement: Vec<Regex>,
    awkward: Vec<Regex>,
}

impl Default for PatternGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternGrammar {
    /// Build the battery with its standard pattern set
    pub fn new() -> Self {
        Self {
            agreement: vec![
                ci(r"\b(?:description|narrator|character|theme|conflict)\s+are\b"),
                ci(r"\b(?:descriptions|narrators|characters|themes)\s+is\b"),
                ci(r"\b(?:he|she|it|this|that)\s+(?:have|are|were|leave|make)\b"),
                ci(r"\b(?:they|we|these|those)\s+(?:has|is|was|leaves|makes)\b"),
                ci(r"\bpoint of view.*?leave\b"),
            ],
            awkward: vec![
                ci(r"feel more deep in"),
                ci(r"make the reader to\s"),
                ci(r"makes reader\s"),
            ],
        }
    }
}

impl GrammarCheck for PatternGrammar {
    fn count_errors(&self, text: &str) -> (usize, Vec<String>) {
        let mut errors = 0.0;
        let mut issues = Vec::new();

        for re in &self.agreement {
            for m in re.find_iter(text) {
                errors += 1.0;
                issues.push(format!("subject-verb agreement: '{}'", m.as_str()));
            }
        }

        for re in &self.awkward {
            for m in re.find_iter(text) {
                errors += 1.0;
                issues.push(format!("awkward phrasing: '{}'", m.as_str()));
            }
        }

        for sentence in split_sentences(text) {
            let words = sentence.split_whitespace().count();
            if words < 3 && !matches!(sentence.to_lowercase().as_str(), "yes" | "no" | "okay") {
                errors += 1.0;
                issues.push(format!("sentence fragment: '{}'", sentence));
            } else if words > 35 && sentence.matches(',').count() < 2 {
                errors += 0.5;
                issues.push("possible run-on sentence".to_string());
            }
        }

        (errors as usize, issues)
    }
}

/// Grammar battery for argumentative writing
///
/// Flags run-ons, agreement slips, and informal register.
#[derive(Debug, Clone)]
pub struct ArgumentGrammar {
    agreement: Vec<Regex>,
    informal: Vec<Regex>,
}

impl Default for ArgumentGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentGrammar {
    /// Build the battery with its standard pattern set
    pub fn new() -> Self {
        Self {
            agreement: vec![
                ci(r"\b(?:he|she|it)\s+(?:are|were|have)\b"),
                ci(r"\b(?:they|we)\s+(?:is|was|has)\b"),
            ],
            informal: vec![
                ci(r"\bgonna\b"),
                ci(r"\bwanna\b"),
                ci(r"\bkinda\b"),
                ci(r"\bsorta\b"),
            ],
        }
    }
}

impl GrammarCheck for ArgumentGrammar {
    fn count_errors(&self, text: &str) -> (usize, Vec<String>) {
        let mut errors = 0;
        let mut issues = Vec::new();

        for sentence in split_sentences(text) {
            if sentence.split_whitespace().count() > 40 && sentence.matches(',').count() < 2 {
                errors += 1;
                issues.push("run-on sentence without internal structure".to_string());
            }
        }

        for re in &self.agreement {
            for m in re.find_iter(text) {
                errors += 1;
                issues.push(format!("subject-verb agreement: '{}'", m.as_str()));
            }
        }

        for re in &self.informal {
            for m in re.find_iter(text) {
                errors += 1;
                issues.push(format!("informal language: '{}'", m.as_str()));
            }
        }

        (errors, issues)
    }
}
