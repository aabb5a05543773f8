//! Engine configuration

use markwell_taxonomy::{AnalysisTaxonomySpec, ArgumentTaxonomySpec};
use serde::{Deserialize, Serialize};

/// Configuration for the assessment engine
///
/// Owns the taxonomy specs for both rubrics; the engine compiles them at
/// construction. Two engines built from different configs are fully
/// independent and can run different rubric versions in one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum input text length (characters); longer input is truncated
    pub max_text_length: usize,

    /// Whether to attempt the external scorer when one is attached
    pub use_external_scorer: bool,

    /// Analysis-rubric taxonomy tables
    pub analysis_taxonomy: AnalysisTaxonomySpec,

    /// Argument-rubric taxonomy tables
    pub argument_taxonomy: ArgumentTaxonomySpec,
}

impl Default for EngineConfig {
    /// Default configuration: standard taxonomies, rule-based scoring only
    fn default() -> Self {
        Self {
            max_text_length: 20_000,
            use_external_scorer: false,
            analysis_taxonomy: AnalysisTaxonomySpec::default(),
            argument_taxonomy: ArgumentTaxonomySpec::default(),
        }
    }
}

impl EngineConfig {
    /// Lenient preset: accepts much longer input (extended responses)
    pub fn lenient() -> Self {
        Self {
            max_text_length: 100_000,
            ..Self::default()
        }
    }

    /// Assisted preset: external scoring enabled when a scorer is attached
    pub fn assisted() -> Self {
        Self {
            use_external_scorer: true,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.analysis_taxonomy.verb_tiers.is_empty() {
            return Err("analysis taxonomy must define at least one verb tier".to_string());
        }
        if self.analysis_taxonomy.effect_tiers.is_empty() {
            return Err("analysis taxonomy must define at least one effect tier".to_string());
        }
        if self.argument_taxonomy.claim_terms.is_empty() {
            return Err("argument taxonomy must define at least one claim term".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.use_external_scorer);
    }

    #[test]
    fn test_lenient_config_is_valid() {
        let config = EngineConfig::lenient();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_text_length, 100_000);
    }

    #[test]
    fn test_assisted_config_enables_external() {
        let config = EngineConfig::assisted();
        assert!(config.validate().is_ok());
        assert!(config.use_external_scorer);
    }

    #[test]
    fn test_zero_text_length_rejected() {
        let mut config = EngineConfig::default();
        config.max_text_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_claim_terms_rejected() {
        let mut config = EngineConfig::default();
        config.argument_taxonomy.claim_terms.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = EngineConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.max_text_length, parsed.max_text_length);
        assert_eq!(config.use_external_scorer, parsed.use_external_scorer);
        assert_eq!(
            config.analysis_taxonomy.verb_tiers.len(),
            parsed.analysis_taxonomy.verb_tiers.len()
        );
        assert_eq!(
            config.argument_taxonomy.claim_terms,
            parsed.argument_taxonomy.claim_terms
        );
    }
}
