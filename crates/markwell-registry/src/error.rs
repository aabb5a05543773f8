//! Error types for registry loading

use thiserror::Error;

/// Errors that can occur while loading a device registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The registry file could not be read
    #[error("Failed to read registry file '{path}': {source}")]
    Io {
        /// Path that was being read
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The registry JSON could not be parsed
    #[error("Invalid registry JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
