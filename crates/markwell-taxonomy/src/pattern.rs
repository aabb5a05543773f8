//! Compiled weighted pattern group shared by both taxonomies

use crate::error::TaxonomyError;
use regex::Regex;

/// A named, weighted group of compiled patterns
///
/// Matching is against lowercased text; patterns are written lowercase.
#[derive(Debug, Clone)]
pub struct PatternGroup {
    label: String,
    weight: f64,
    regexes: Vec<Regex>,
}

impl PatternGroup {
    /// Compile a group from raw pattern strings
    pub fn compile(
        table: &str,
        label: impl Into<String>,
        weight: f64,
        patterns: &[String],
    ) -> Result<Self, TaxonomyError> {
        let mut regexes = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let re = Regex::new(pattern).map_err(|source| TaxonomyError::InvalidPattern {
                table: table.to_string(),
                pattern: pattern.clone(),
                source,
            })?;
            regexes.push(re);
        }
        Ok(Self {
            label: label.into(),
            weight,
            regexes,
        })
    }

    /// Human-readable label for this group
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Weight contributed by a match in this group
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Whether any pattern in the group matches the text
    pub fn is_match(&self, text: &str) -> bool {
        self.regexes.iter().any(|re| re.is_match(text))
    }

    /// Number of patterns in the group that match the text
    pub fn match_count(&self, text: &str) -> usize {
        self.regexes.iter().filter(|re| re.is_match(text)).count()
    }

    /// All non-overlapping capture-group-1 matches across the group's patterns
    ///
    /// Patterns without a capture group yield the whole match.
    pub fn captures(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        for re in &self.regexes {
            for caps in re.captures_iter(text) {
                let m = caps
                    .get(1)
                    .or_else(|| caps.get(0))
                    .map(|m| m.as_str().trim().to_string());
                if let Some(m) = m {
                    if !m.is_empty() {
                        out.push(m);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(patterns: &[&str]) -> PatternGroup {
        let patterns: Vec<String> = patterns.iter().map(|s| s.to_string()).collect();
        PatternGroup::compile("test", "Test", 1.0, &patterns).unwrap()
    }

    #[test]
    fn test_is_match() {
        let g = group(&[r"\bbecause\b", r"\btherefore\b"]);
        assert!(g.is_match("he is a victim because he suffered"));
        assert!(!g.is_match("he is a victim"));
    }

    #[test]
    fn test_captures_group_one() {
        let g = group(&[r"when\s+([^,\.]+)"]);
        let caps = g.captures("when jonas rides away, the story ends");
        assert_eq!(caps, vec!["jonas rides away".to_string()]);
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let patterns = vec!["(unclosed".to_string()];
        let err = PatternGroup::compile("verbs", "Broken", 1.0, &patterns).unwrap_err();
        assert!(matches!(err, TaxonomyError::InvalidPattern { .. }));
    }
}
