//! Registry container and the device-matching strategy ladder

use crate::device::{Device, DeviceRecord};
use crate::error::RegistryError;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

// Confidence floors for the identification strategies
const TOPIC_MATCH_THRESHOLD: f64 = 0.5;
const PAIR_MATCH_THRESHOLD: f64 = 0.7;
const PATTERN_MATCH_THRESHOLD: f64 = 0.6;

// Suffixes stripped during name normalization
const NOISE_SUFFIXES: [&str; 6] = [
    "point of view",
    "pov",
    "narrative",
    "narration",
    "device",
    "technique",
];

/// A device resolved from a student-written name
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceMatch {
    /// Registry key of the matched device (lowercased canonical name)
    pub name: String,
    /// Match confidence in (0, 1]
    pub confidence: f64,
}

#[derive(Deserialize)]
struct KernelFile {
    #[serde(default)]
    micro_devices: Vec<DeviceRecord>,
    #[serde(default)]
    macro_pattern: Option<MacroPattern>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MacroPattern {
    Text(String),
    Detailed {
        #[serde(default)]
        description: String,
    },
}

/// In-memory device registry with fuzzy name matching
///
/// Keys are lowercased canonical names. Duplicate names in the source file
/// keep the first record seen, which is the primary definition.
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: BTreeMap<String, Device>,
    normalized: BTreeMap<String, String>,
    aliases: Vec<(String, String)>,
    macro_pattern: String,
}

impl DeviceRegistry {
    /// An empty registry; matching against it always misses
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Load a registry from JSON text
    pub fn from_json_str(raw: &str) -> Result<Self, RegistryError> {
        let kernel: KernelFile = serde_json::from_str(raw)?;

        let mut registry = Self::new();
        for record in kernel.micro_devices {
            let key = record.name.to_lowercase();
            if key.is_empty() {
                continue;
            }
            if registry.devices.contains_key(&key) {
                warn!(device = %key, "duplicate device entry ignored, keeping first");
                continue;
            }
            let normalized = normalize(&record.name);
            registry.normalized.insert(normalized, key.clone());
            registry.devices.insert(key, Device::from(record));
        }

        registry.macro_pattern = match kernel.macro_pattern {
            Some(MacroPattern::Text(text)) => text,
            Some(MacroPattern::Detailed { description }) => description,
            None => String::new(),
        };

        info!(devices = registry.devices.len(), "device registry loaded");
        Ok(registry)
    }

    /// Seed the alias table (student phrasing to canonical name)
    pub fn set_aliases(&mut self, aliases: impl IntoIterator<Item = (String, String)>) {
        self.aliases = aliases
            .into_iter()
            .map(|(a, c)| (normalize(&a), c))
            .collect();
    }

    /// Number of devices loaded
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the registry has no devices
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Look up a device by its registry key
    pub fn get(&self, name: &str) -> Option<&Device> {
        self.devices.get(&name.to_lowercase())
    }

    /// Function text for a device, if known
    pub fn get_function(&self, name: &str) -> Option<&str> {
        self.get(name)
            .map(|d| d.function.as_str())
            .filter(|f| !f.is_empty())
    }

    /// Definition text for a device, if known
    pub fn get_definition(&self, name: &str) -> Option<&str> {
        self.get(name)
            .map(|d| d.definition.as_str())
            .filter(|d| !d.is_empty())
    }

    /// The work-level macro pattern, if the registry carried one
    pub fn macro_pattern(&self) -> Option<&str> {
        if self.macro_pattern.is_empty() {
            None
        } else {
            Some(&self.macro_pattern)
        }
    }

    /// Match a student-written device name against the registry
    ///
    /// Strategy ladder: exact key match (1.0), normalized match (0.95),
    /// then token overlap (overlap ratio scaled by 0.9, requiring at least
    /// two shared words and a scaled ratio of at least 0.5).
    pub fn match_device(&self, student_name: &str) -> Option<DeviceMatch> {
        if self.devices.is_empty() {
            return None;
        }

        // Aliases re-enter the ladder under the canonical name
        let student_name = self.apply_alias(student_name);

        let student_lower = student_name.to_lowercase().trim().to_string();
        if self.devices.contains_key(&student_lower) {
            return Some(DeviceMatch {
                name: student_lower,
                confidence: 1.0,
            });
        }

        let student_norm = normalize(&student_name);
        if let Some(key) = self.normalized.get(&student_norm) {
            return Some(DeviceMatch {
                name: key.clone(),
                confidence: 0.95,
            });
        }

        let student_words: Vec<&str> = student_norm.split_whitespace().collect();
        if student_words.is_empty() {
            return None;
        }

        let mut best: Option<DeviceMatch> = None;
        for (norm_name, key) in &self.normalized {
            let kernel_words: Vec<&str> = norm_name.split_whitespace().collect();
            let overlap = student_words
                .iter()
                .filter(|w| kernel_words.contains(w))
                .count();
            if overlap < 2 {
                continue;
            }
            let ratio = overlap as f64 / student_words.len().max(kernel_words.len()) as f64;
            let confidence = ratio * 0.9;
            if best.as_ref().is_none_or(|b| confidence > b.confidence) {
                best = Some(DeviceMatch {
                    name: key.clone(),
                    confidence,
                });
            }
        }

        best.filter(|m| m.confidence >= 0.5)
    }

    fn apply_alias(&self, name: &str) -> String {
        let normalized = normalize(name);
        for (alias, canonical) in &self.aliases {
            if *alias == normalized {
                return canonical.clone();
            }
        }
        name.to_string()
    }

    /// Identify which device the text analyzes
    ///
    /// Tries, in order: individual extracted topics, adjacent topic pairs
    /// (with a stricter floor), direct mention of a registry name in the
    /// text body, then "uses/employs X to" pattern captures.
    pub fn identify_device(&self, text: &str, topics: &[String]) -> Option<String> {
        if self.devices.is_empty() {
            return None;
        }

        let text_lower = text.to_lowercase();

        for topic in topics {
            if topic.len() < 4 {
                continue;
            }
            if let Some(m) = self.match_device(topic) {
                if m.confidence >= TOPIC_MATCH_THRESHOLD {
                    debug!(device = %m.name, topic = %topic, confidence = m.confidence,
                        "device identified from topic");
                    return Some(m.name);
                }
            }
        }

        for pair in topics.windows(2) {
            let combined = format!("{} {}", pair[0], pair[1]);
            if let Some(m) = self.match_device(&combined) {
                if m.confidence >= PAIR_MATCH_THRESHOLD {
                    debug!(device = %m.name, combined = %combined, confidence = m.confidence,
                        "device identified from topic pair");
                    return Some(m.name);
                }
            }
        }

        for name in self.devices.keys() {
            if text_lower.contains(name.as_str()) || text_lower.contains(normalize(name).as_str()) {
                debug!(device = %name, "device identified in text body");
                return Some(name.clone());
            }
        }

        for probe in usage_probes() {
            for caps in probe.captures_iter(&text_lower) {
                if let Some(candidate) = caps.get(1) {
                    if let Some(m) = self.match_device(candidate.as_str().trim()) {
                        if m.confidence >= PATTERN_MATCH_THRESHOLD {
                            debug!(device = %m.name, candidate = candidate.as_str(),
                                confidence = m.confidence, "device identified from usage pattern");
                            return Some(m.name);
                        }
                    }
                }
            }
        }

        None
    }
}

fn usage_probes() -> [Regex; 2] {
    [
        Regex::new(r"uses?\s+([a-z\s]{8,40}?)\s+(?:to|when|in|where)")
            .expect("static usage pattern is valid"),
        Regex::new(r"employs?\s+([a-z\s]{8,40}?)\s+(?:to|when|in|where)")
            .expect("static usage pattern is valid"),
    ]
}

fn normalize(name: &str) -> String {
    let mut result = name.to_lowercase();

    for suffix in NOISE_SUFFIXES {
        if result.ends_with(suffix) {
            result = result.replace(suffix, "");
            result = result.trim().to_string();
        }
    }

    let cleaned: String = result
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const KERNEL: &str = r#"{
        "micro_devices": [
            {
                "name": "Third-Person Limited",
                "definition": "Narration restricted to one character's perceptions",
                "pedagogical_function": "Controls what readers can know"
            },
            {
                "name": "Free Indirect Discourse",
                "definition": "Character voice bleeding into third-person narration",
                "pedagogical_function": "Blurs narrator and character"
            },
            {
                "name": "Third-Person Limited",
                "definition": "DUPLICATE ENTRY",
                "pedagogical_function": "should be ignored"
            },
            {
                "name": "Unreliable Narrator",
                "definition": "A narrator whose account cannot be trusted",
                "function": "Forces readers to read against the narration"
            }
        ],
        "macro_pattern": {"description": "Information control across the novel"}
    }"#;

    fn registry() -> DeviceRegistry {
        let mut r = DeviceRegistry::from_json_str(KERNEL).unwrap();
        r.set_aliases([
            ("pov".to_string(), "third-person limited".to_string()),
            ("fid".to_string(), "free indirect discourse".to_string()),
        ]);
        r
    }

    #[test]
    fn test_first_record_wins_on_duplicates() {
        let r = registry();
        assert_eq!(r.len(), 3);
        assert_eq!(
            r.get_definition("Third-Person Limited"),
            Some("Narration restricted to one character's perceptions")
        );
    }

    #[test]
    fn test_exact_match_full_confidence() {
        let r = registry();
        let m = r.match_device("third-person limited").unwrap();
        assert_eq!(m.name, "third-person limited");
        assert!((m.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_match() {
        let r = registry();
        // Punctuation differences fall to the normalized strategy
        let m = r.match_device("Third-Person Limited!").unwrap();
        assert_eq!(m.name, "third-person limited");
        assert!((m.confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_alias_reenters_ladder() {
        let r = registry();
        let m = r.match_device("pov").unwrap();
        assert_eq!(m.name, "third-person limited");
        assert!((m.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_word_overlap_match() {
        let r = registry();
        let m = r.match_device("indirect discourse style").unwrap();
        assert_eq!(m.name, "free indirect discourse");
        assert!(m.confidence < 0.95);
        assert!(m.confidence >= 0.5);
    }

    #[test]
    fn test_single_word_overlap_rejected() {
        let r = registry();
        assert!(r.match_device("narrator voice thing").is_none());
    }

    #[test]
    fn test_empty_registry_never_matches() {
        let r = DeviceRegistry::new();
        assert!(r.match_device("unreliable narrator").is_none());
        assert!(r.identify_device("some text", &[]).is_none());
    }

    #[test]
    fn test_identify_from_topic() {
        let r = registry();
        let found = r.identify_device(
            "The story limits what we see.",
            &["Jonas".to_string(), "unreliable narrator".to_string()],
        );
        assert_eq!(found.as_deref(), Some("unreliable narrator"));
    }

    #[test]
    fn test_identify_from_text_body() {
        let r = registry();
        let found = r.identify_device(
            "The free indirect discourse lets us hear the character's doubts.",
            &[],
        );
        assert_eq!(found.as_deref(), Some("free indirect discourse"));
    }

    #[test]
    fn test_identify_from_usage_pattern() {
        let r = registry();
        let found = r.identify_device(
            "The author uses free indirect speech to show her doubts.",
            &[],
        );
        assert_eq!(found.as_deref(), Some("free indirect discourse"));
    }

    #[test]
    fn test_short_topics_skipped() {
        let r = registry();
        assert!(r.identify_device("nothing relevant here", &["pov".to_string()]).is_none());
    }

    #[test]
    fn test_function_preference() {
        let r = registry();
        assert_eq!(
            r.get_function("unreliable narrator"),
            Some("Forces readers to read against the narration")
        );
        assert_eq!(r.macro_pattern(), Some("Information control across the novel"));
    }
}
