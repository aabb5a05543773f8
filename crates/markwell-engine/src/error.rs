//! Engine error types

use markwell_registry::RegistryError;
use markwell_taxonomy::TaxonomyError;
use thiserror::Error;

/// Errors that can occur during engine setup
///
/// Evaluation itself never fails: malformed student text is an input
/// condition, not an error. Only configuration and registry loading can go
/// wrong, and both surface here at setup time.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid engine configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A taxonomy table failed to compile
    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// The device registry failed to load
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}
