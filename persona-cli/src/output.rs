//! Persona file output.

use std::io;
use std::path::PathBuf;
use tracing::debug;

/// Writes persona text to `<dir>/<username>_persona.txt`.
///
/// One file per username; a rerun overwrites the previous file.
#[derive(Debug, Clone)]
pub struct PersonaWriter {
    dir: PathBuf,
}

impl PersonaWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File path used for `username`.
    pub fn path_for(&self, username: &str) -> PathBuf {
        self.dir.join(format!("{}_persona.txt", username))
    }

    /// Create the output directory if needed and write `text`.
    pub async fn save(&self, username: &str, text: &str) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(username);
        tokio::fs::write(&path, text.as_bytes()).await?;

        debug!(path = %path.display(), bytes = text.len(), "Persona written");
        Ok(path)
    }
}

impl Default for PersonaWriter {
    fn default() -> Self {
        Self::new("output")
    }
}
