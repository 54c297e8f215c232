//! Persona Agent - persona generation over LLM backends
//!
//! Provides the generation half of the persona pipeline:
//! - Trait-based LLM backends (OpenAI-compatible HTTP, mock)
//! - Deterministic persona prompt assembly with citation rules
//! - A generator service that short-circuits on empty input
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            PersonaService               │
//! │  (prompt assembly + completion call)    │
//! └────────────────┬────────────────────────┘
//!                  │
//!      ┌───────────┴───────────┐
//!      ▼                       ▼
//! ┌─────────────┐       ┌─────────────┐
//! │ LlmBackend  │       │ prompt      │
//! │ (OpenAI/    │       │ (template,  │
//! │  Mock)      │       │  citations) │
//! └─────────────┘       └─────────────┘
//! ```

pub mod backend;
pub mod prompt;
pub mod service;

// Re-export main types for convenience
pub use backend::traits::{CompletionRequest, CompletionResponse, LlmBackend, LlmError};
pub use backend::{MockBackend, OpenAiBackend};
pub use prompt::build_persona_prompt;
pub use service::{no_data_message, PersonaService, ServiceConfig, ServiceError};
