use std::sync::Arc;
use std::time::Duration;

use preventivo_core::artifacts::DebugArtifacts;
use preventivo_export::render::Renderer;
use preventivo_export::template::Template;
use preventivo_store::source::RecordSource;

/// Shared application state, built once at startup and injected into handlers
/// via Axum state. Everything here is read-only after construction.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordSource>,
    pub renderer: Arc<dyn Renderer>,
    pub template: Arc<Template>,
    pub artifacts: DebugArtifacts,
    /// Domain key used when the request names none.
    pub default_domain: Option<String>,
    pub render_timeout: Duration,
}
