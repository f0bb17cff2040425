//! Diagnostic artifacts written to a local directory.
//!
//! Raw store responses, the resolved template data, populated HTML, the
//! rendered PDF, screenshots and an error log. Purely for inspection: nothing
//! here is ever read back, and a failed write is logged rather than returned.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, warn};

use crate::filename::sanitize_filename;

/// One JSON object per line, appended.
pub const ERROR_LOG: &str = "error_log.jsonl";

#[derive(Debug, Clone, Default)]
pub struct DebugArtifacts {
    dir: PathBuf,
    enabled: bool,
    save_responses: bool,
    save_template_data: bool,
    save_html: bool,
    save_screenshots: bool,
    /// Shared by clones so appends from concurrent requests never interleave.
    log_lock: Arc<Mutex<()>>,
}

#[derive(Serialize)]
struct ErrorEntry<'a> {
    timestamp: String,
    message: &'a str,
    error: String,
}

impl DebugArtifacts {
    /// A sink that writes nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// A sink writing under `dir`. `enabled` gates everything; the other flags
    /// select which artifact kinds are kept.
    pub fn new(
        dir: impl Into<PathBuf>,
        enabled: bool,
        save_responses: bool,
        save_template_data: bool,
        save_html: bool,
    ) -> Self {
        Self {
            dir: dir.into(),
            enabled,
            save_responses,
            save_template_data,
            save_html,
            save_screenshots: false,
            log_lock: Arc::default(),
        }
    }

    /// Also keep full-page screenshots of rendered documents.
    pub fn with_screenshots(mut self, enabled: bool) -> Self {
        self.save_screenshots = enabled;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn wants_screenshots(&self) -> bool {
        self.enabled && self.save_screenshots
    }

    /// Raw store response, e.g. `project_casawa`.
    pub fn save_response<T: Serialize>(&self, name: &str, value: &T) {
        if self.save_responses {
            self.save_json(&format!("{name}.json"), value);
        }
    }

    /// The resolved data a document was populated from.
    pub fn save_template_data<T: Serialize>(&self, name: &str, value: &T) {
        if self.save_template_data {
            self.save_json(&format!("{name}_template_data.json"), value);
        }
    }

    /// A populated HTML document.
    pub fn save_html(&self, name: &str, html: &str) {
        if self.save_html {
            self.save_text(&format!("{name}.html"), html);
        }
    }

    /// The rendered PDF, `{name}.pdf`.
    pub fn save_pdf(&self, name: &str, pdf: &[u8]) {
        if self.enabled {
            self.write(&format!("{name}.pdf"), pdf);
        }
    }

    /// A full-page capture, `{name}_screenshot.png`.
    pub fn save_screenshot(&self, name: &str, png: &[u8]) {
        if self.wants_screenshots() {
            self.write(&format!("{name}_screenshot.png"), png);
        }
    }

    /// Append one entry to [`ERROR_LOG`].
    pub fn record_error(&self, message: &str, error: &dyn std::error::Error) {
        if !self.enabled {
            return;
        }

        let entry = ErrorEntry {
            timestamp: jiff::Timestamp::now().to_string(),
            message,
            error: error.to_string(),
        };
        let mut line = match serde_json::to_vec(&entry) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "failed to serialize error log entry");
                return;
            }
        };
        line.push(b'\n');

        let path = self.dir.join(ERROR_LOG);
        let _guard = self.log_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let result = fs::create_dir_all(&self.dir).and_then(|()| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?
                .write_all(&line)
        });
        if let Err(e) = result {
            warn!(path = %path.display(), error = %e, "failed to append to error log");
        }
    }

    pub fn save_json<T: Serialize>(&self, filename: &str, value: &T) {
        if !self.enabled {
            return;
        }
        match serde_json::to_vec_pretty(value) {
            Ok(bytes) => self.write(filename, &bytes),
            Err(e) => warn!(filename, error = %e, "failed to serialize debug artifact"),
        }
    }

    pub fn save_text(&self, filename: &str, text: &str) {
        if self.enabled {
            self.write(filename, text.as_bytes());
        }
    }

    fn write(&self, filename: &str, bytes: &[u8]) {
        let path = self.dir.join(sanitize_filename(filename));
        let result = fs::create_dir_all(&self.dir).and_then(|()| fs::write(&path, bytes));
        match result {
            Ok(()) => debug!(path = %path.display(), "debug artifact saved"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to save debug artifact"),
        }
    }
}
