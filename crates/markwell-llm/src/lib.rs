//! Markwell LLM Provider Layer
//!
//! Pluggable LLM provider implementations and the external rubric scorer
//! built on top of them.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `markwell-domain`, plus `RubricScorer`, which turns any provider into an
//! `ExternalScorer`: it builds the rubric prompt, parses the JSON response,
//! and maps every failure mode to `ExternalOutcome::Unavailable` so the
//! engine's fallback stays a plain branch.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use markwell_llm::MockProvider;
//! use markwell_domain::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ollama;
pub mod scorer;

use markwell_domain::LlmProvider as LlmProviderTrait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::OllamaProvider;
pub use scorer::RubricScorer;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Queued responses are consumed in order; once the queue is empty, the
/// default response is returned for every call. Prompts are recorded so
/// tests can assert on what was sent.
///
/// # Examples
///
/// ```
/// use markwell_llm::MockProvider;
/// use markwell_domain::LlmProvider;
///
/// let provider = MockProvider::new("default");
/// provider.push_response("first");
/// assert_eq!(provider.generate("a").unwrap(), "first");
/// assert_eq!(provider.generate("b").unwrap(), "default");
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    queued: Arc<Mutex<VecDeque<Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            queued: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a response to be returned by the next call
    pub fn push_response(&self, response: impl Into<String>) {
        self.queued.lock().unwrap().push_back(Ok(response.into()));
    }

    /// Queue an error to be returned by the next call
    pub fn push_error(&self, message: impl Into<String>) {
        self.queued.lock().unwrap().push_back(Err(message.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Get the most recent prompt, if any call was made
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        match self.queued.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(LlmError::Other(message)),
            None => Ok(self.default_response.clone()),
        }
    }
}
