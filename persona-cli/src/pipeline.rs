//! Persona pipeline: extract → fetch → generate → persist.
//!
//! Runs each stage once, in order. Expected early exits (bad URL, no
//! activity) are outcomes; failures are [`PipelineError`]s.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use persona_agent::{PersonaService, ServiceError};
use reddit_source::{extract_username, ActivitySource, FetchError};

use crate::output::PersonaWriter;

/// Items fetched per category (comments, posts) when not configured.
pub const DEFAULT_FETCH_LIMIT: usize = 100;

/// How a run ended when nothing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The URL did not contain `/user/<name>`
    InvalidUrl,
    /// The user exists but has no visible comments or posts
    NoData { username: String },
    /// Persona written
    Saved { username: String, path: PathBuf },
}

impl RunOutcome {
    /// Line printed for this outcome.
    pub fn message(&self) -> String {
        match self {
            RunOutcome::InvalidUrl => {
                "Error: Could not extract username from the provided URL.".to_string()
            }
            RunOutcome::NoData { username } => {
                format!("No Reddit data found for user '{}'.", username)
            }
            RunOutcome::Saved { path, .. } => format!("Persona saved to {}", path.display()),
        }
    }
}

/// Process exit status for a finished run.
///
/// Every [`RunOutcome`] is a normal exit (0), including a bad URL or a user
/// with no activity; any [`PipelineError`] exits 1.
pub fn exit_status(result: &Result<RunOutcome, PipelineError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Stage failures.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Reddit could not be read
    #[error("Could not fetch Reddit data for u/{username}: {source}")]
    Fetch {
        username: String,
        #[source]
        source: FetchError,
    },

    /// The model call failed; nothing was written
    #[error("Could not generate persona for u/{username}: {source}")]
    Generate {
        username: String,
        #[source]
        source: ServiceError,
    },

    /// The persona file could not be written
    #[error("Could not write {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Sequences the persona stages.
pub struct Pipeline {
    source: Arc<dyn ActivitySource>,
    service: PersonaService,
    writer: PersonaWriter,
    fetch_limit: usize,
}

impl Pipeline {
    pub fn new(source: Arc<dyn ActivitySource>, service: PersonaService, writer: PersonaWriter) -> Self {
        Self {
            source,
            service,
            writer,
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }

    /// Set the per-category fetch limit.
    pub fn with_fetch_limit(mut self, limit: usize) -> Self {
        self.fetch_limit = limit;
        self
    }

    /// Run the pipeline for a profile URL.
    pub async fn run(&self, url: &str) -> Result<RunOutcome, PipelineError> {
        let Some(username) = extract_username(url) else {
            warn!(url = %url, "Could not extract username");
            return Ok(RunOutcome::InvalidUrl);
        };

        info!(
            username = %username,
            source = self.source.name(),
            limit = self.fetch_limit,
            "Fetching data for u/{}", username
        );

        let items = self
            .source
            .fetch_activity(&username, self.fetch_limit)
            .await
            .map_err(|source| PipelineError::Fetch {
                username: username.clone(),
                source,
            })?;

        if items.is_empty() {
            return Ok(RunOutcome::NoData { username });
        }

        let persona = self
            .service
            .generate(&username, &items)
            .await
            .map_err(|source| PipelineError::Generate {
                username: username.clone(),
                source,
            })?;

        let path = self
            .writer
            .save(&username, &persona)
            .await
            .map_err(|source| PipelineError::Persist {
                path: self.writer.path_for(&username),
                source,
            })?;

        Ok(RunOutcome::Saved { username, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            RunOutcome::InvalidUrl.message(),
            "Error: Could not extract username from the provided URL."
        );
        assert_eq!(
            RunOutcome::NoData {
                username: "alice".to_string()
            }
            .message(),
            "No Reddit data found for user 'alice'."
        );
        assert_eq!(
            RunOutcome::Saved {
                username: "alice".to_string(),
                path: PathBuf::from("output/alice_persona.txt"),
            }
            .message(),
            "Persona saved to output/alice_persona.txt"
        );
    }

    #[test]
    fn test_outcomes_exit_zero_and_failures_exit_one() {
        let invalid: Result<RunOutcome, PipelineError> = Ok(RunOutcome::InvalidUrl);
        let no_data = Ok(RunOutcome::NoData {
            username: "alice".to_string(),
        });
        let failed = Err(PipelineError::Fetch {
            username: "alice".to_string(),
            source: FetchError::RateLimited,
        });

        assert_eq!(exit_status(&invalid), 0);
        assert_eq!(exit_status(&no_data), 0);
        assert_eq!(exit_status(&failed), 1);
    }

    #[test]
    fn test_fetch_error_message_names_user() {
        let err = PipelineError::Fetch {
            username: "ghost".to_string(),
            source: FetchError::NotFound("ghost".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Could not fetch Reddit data for u/ghost: Reddit user not found: ghost"
        );
    }
}
