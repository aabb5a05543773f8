//! Ollama Provider Implementation
//!
//! Integration with Ollama's local LLM API for running local models.
//!
//! The external scoring step is a single blocking attempt by contract, so
//! this provider performs exactly one HTTP request per call: no retries, no
//! backoff. A slow or absent Ollama instance surfaces as an error, which the
//! rubric scorer maps to `ExternalOutcome::Unavailable`.
//!
//! # Examples
//!
//! ```no_run
//! use markwell_llm::OllamaProvider;
//! use markwell_domain::LlmProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3");
//! let reply = provider.generate("Say 'hello' and nothing else");
//! ```

use crate::LlmError;
use markwell_domain::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::blocking::Client,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new Ollama provider with default endpoint
    ///
    /// Uses `http://localhost:11434` and requires a model name.
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Create a new Ollama provider with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .expect("static client configuration is valid");

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
        }
    }

    /// Configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Configured model name
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl LlmProviderTrait for OllamaProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: OllamaGenerateResponse = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if body.response.is_empty() {
            return Err(LlmError::InvalidResponse("Empty response body".to_string()));
        }

        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434", "llama3");
        assert_eq!(provider.endpoint(), "http://localhost:11434");
        assert_eq!(provider.model(), "llama3");
    }

    #[test]
    fn test_ollama_provider_default_endpoint() {
        let provider = OllamaProvider::default_endpoint("mistral");
        assert_eq!(provider.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(provider.model(), "mistral");
    }

    #[test]
    fn test_ollama_unreachable_is_communication_error() {
        // Unroutable port, short timeout, single attempt.
        let provider = OllamaProvider::with_timeout(
            "http://127.0.0.1:1",
            "llama3",
            Duration::from_millis(200),
        );

        let result = provider.generate("test");
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    // Integration test (requires running Ollama)
    #[test]
    #[ignore]
    fn test_ollama_generate_integration() {
        let provider = OllamaProvider::default_endpoint("llama3");
        let result = provider.generate("Say 'hello' and nothing else");

        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }
}
