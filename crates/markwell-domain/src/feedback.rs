//! Feedback map produced by the synthesizer
//!
//! A mapping from sub-metric key to feedback text, derived deterministically
//! from components and scores. Never independently mutated after synthesis;
//! the engine only merges external-scorer passthrough fields into it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known feedback keys
pub mod keys {
    /// Presence sub-metric current state
    pub const SM1: &str = "sm1";
    /// Presence sub-metric next step
    pub const SM1_NEXT: &str = "sm1_next";
    /// Depth sub-metric current state
    pub const SM2: &str = "sm2";
    /// Depth sub-metric next step
    pub const SM2_NEXT: &str = "sm2_next";
    /// Cohesion sub-metric current state
    pub const SM3: &str = "sm3";
    /// Cohesion sub-metric next step
    pub const SM3_NEXT: &str = "sm3_next";
    /// Concept-specific guidance when a device was matched
    pub const DEVICE_GUIDANCE: &str = "device_guidance";
    /// Reasoning-layer progression guidance (argument rubric)
    pub const LAYER_GUIDANCE: &str = "layer_guidance";
    /// Name of the matched device, when present
    pub const DETECTED_DEVICE: &str = "detected_device";
}

/// Per-sub-metric feedback: current-state and next-step text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feedback {
    entries: BTreeMap<String, String>,
}

impl Feedback {
    /// Create an empty feedback map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an entry, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Set an entry only if absent (used when merging external passthrough)
    pub fn set_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Look up an entry
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut fb = Feedback::new();
        fb.set(keys::SM1, "Topic and Detail present.");
        assert_eq!(fb.get(keys::SM1), Some("Topic and Detail present."));
        assert_eq!(fb.get(keys::SM2), None);
    }

    #[test]
    fn test_set_if_absent_does_not_overwrite() {
        let mut fb = Feedback::new();
        fb.set(keys::SM1_NEXT, "original");
        fb.set_if_absent(keys::SM1_NEXT, "replacement");
        assert_eq!(fb.get(keys::SM1_NEXT), Some("original"));
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let mut fb = Feedback::new();
        fb.set(keys::SM1, "a");
        fb.set(keys::SM1_NEXT, "b");
        let json = serde_json::to_string(&fb).unwrap();
        assert_eq!(json, r#"{"sm1":"a","sm1_next":"b"}"#);
    }
}
