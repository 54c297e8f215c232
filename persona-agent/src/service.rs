//! PersonaService - turns fetched activity into persona text.
//!
//! Builds the persona prompt and runs one completion against the configured
//! backend. Backend failures are returned as errors and never as persona text.

use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::backend::traits::{CompletionRequest, FinishReason, LlmBackend, LlmError};
use crate::prompt::{build_persona_prompt, SYSTEM_PROMPT};
use reddit_source::ContentItem;

/// Error types for the service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Backend error
    #[error("Backend error: {0}")]
    Backend(#[from] LlmError),

    /// Backend answered with no content
    #[error("Model '{model}' returned an empty completion")]
    EmptyCompletion { model: String },
}

/// Configuration for the PersonaService.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// System role sent with every request
    pub system_prompt: String,
    /// Sampling temperature, kept low for literal output
    pub temperature: f32,
    /// Optional cap on generated tokens
    pub max_tokens: Option<u32>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            system_prompt: SYSTEM_PROMPT.to_string(),
            temperature: 0.3,
            max_tokens: None,
        }
    }
}

/// Fallback persona text for a user with no fetched activity.
pub fn no_data_message(username: &str) -> String {
    format!("Could not generate persona for u/{}: No data found.", username)
}

/// Generates persona text with an LLM backend.
pub struct PersonaService {
    config: ServiceConfig,
    backend: Arc<dyn LlmBackend>,
}

impl PersonaService {
    /// Create a new service over the given backend.
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self {
            config: ServiceConfig::default(),
            backend,
        }
    }

    /// Create with configuration.
    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate a persona for `username` from `items`.
    ///
    /// Empty input returns the no-data message without calling the backend.
    pub async fn generate(&self, username: &str, items: &[ContentItem]) -> Result<String, ServiceError> {
        if items.is_empty() {
            return Ok(no_data_message(username));
        }

        let prompt = build_persona_prompt(username, items);

        info!(
            username = %username,
            model = %self.backend.id(),
            items = items.len(),
            "Generating structured persona for u/{} with LLM", username
        );

        let mut request = CompletionRequest::user(prompt)
            .with_system(&self.config.system_prompt)
            .with_temperature(self.config.temperature);
        if let Some(max) = self.config.max_tokens {
            request = request.with_max_tokens(max);
        }

        let start = Instant::now();
        let completion = self.backend.complete(request).await?;

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            total_tokens = completion.usage.total(),
            "Persona generated"
        );

        if completion.finish_reason != FinishReason::Stop {
            warn!(finish_reason = ?completion.finish_reason, "Completion did not finish normally");
        }

        if completion.content.trim().is_empty() {
            return Err(ServiceError::EmptyCompletion {
                model: self.backend.id().to_string(),
            });
        }

        Ok(completion.content)
    }
}
