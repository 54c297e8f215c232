//! Reddit persona CLI
//!
//! Wires the pipeline together: profile URL → username → Reddit activity →
//! persona prompt → LLM completion → `output/<username>_persona.txt`.

pub mod config;
pub mod output;
pub mod pipeline;

pub use config::{Args, ConfigError};
pub use output::PersonaWriter;
pub use pipeline::{exit_status, Pipeline, PipelineError, RunOutcome, DEFAULT_FETCH_LIMIT};
