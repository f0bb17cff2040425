use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template declares unknown placeholders: {}", .0.join(", "))]
    UnknownPlaceholders(Vec<String>),

    #[error("failed to read template {path}: {source}")]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch renderer: {0}")]
    Launch(String),

    #[error("renderer failed to load document: {0}")]
    Navigation(String),

    #[error("PDF generation failed: {0}")]
    Rasterize(String),

    #[error("rendering timed out after {0:?}")]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Failures of the render stage, as opposed to template configuration.
    pub fn is_render_failure(&self) -> bool {
        !matches!(
            self,
            ExportError::UnknownPlaceholders(_) | ExportError::TemplateLoad { .. }
        )
    }
}
