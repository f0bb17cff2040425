//! resolve → populate → render for one domain key.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use preventivo_core::filename::quote_filename;
use preventivo_export::error::ExportError;
use preventivo_export::populate::fill;
use preventivo_export::styles::inject_print_safety;
use preventivo_store::resolve::resolve;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug)]
pub struct GeneratedQuote {
    /// File name without extension, e.g. `preventivo_casawa`.
    pub filename: String,
    pub pdf: Vec<u8>,
}

pub async fn generate(state: &AppState, domain_key: &str) -> Result<GeneratedQuote, ApiError> {
    let quote = resolve(state.records.as_ref(), domain_key).await?;
    debug!(
        domain_key,
        tasks = quote.tasks.len(),
        accounts = quote.accounts.len(),
        "quote resolved"
    );
    state.artifacts.save_template_data(domain_key, &quote);

    let filename = quote_filename(quote.file_key());
    let issue_date = jiff::Zoned::now().date();
    let filled = fill(&state.template, &quote, issue_date);
    state.artifacts.save_html(&filename, &filled);

    let html = inject_print_safety(&filled);
    debug!(domain_key, bytes = html.len(), "document populated");
    state
        .artifacts
        .save_html(&format!("{filename}_modified"), &html);

    if state.artifacts.wants_screenshots() {
        capture_screenshot(state, &filename, &html).await;
    }

    let pdf = tokio::time::timeout(state.render_timeout, state.renderer.render(&html))
        .await
        .map_err(|_| ExportError::Timeout(state.render_timeout))??;
    state.artifacts.save_pdf(&filename, &pdf);

    info!(domain_key, filename, bytes = pdf.len(), "preventivo generated");
    Ok(GeneratedQuote { filename, pdf })
}

/// Generate one quote and write it to `output`, or to `<filename>.pdf` in the
/// working directory. Returns the path written.
pub async fn generate_to_file(
    state: &AppState,
    domain_key: &str,
    output: Option<&Path>,
) -> Result<PathBuf, ApiError> {
    let quote = generate(state, domain_key).await?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format!("{}.pdf", quote.filename)));

    tokio::fs::write(&path, &quote.pdf)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to write {}: {e}", path.display())))?;
    info!(path = %path.display(), "preventivo written");
    Ok(path)
}

/// Best effort: a failed capture is logged and never fails the request.
async fn capture_screenshot(state: &AppState, filename: &str, html: &str) {
    match tokio::time::timeout(state.render_timeout, state.renderer.screenshot(html)).await {
        Ok(Ok(Some(png))) => state.artifacts.save_screenshot(filename, &png),
        Ok(Ok(None)) => debug!("renderer does not take screenshots"),
        Ok(Err(e)) => {
            warn!(filename, error = %e, "screenshot failed");
            state
                .artifacts
                .record_error(&format!("Failed to take screenshot for {filename}"), &e);
        }
        Err(_) => warn!(filename, "screenshot timed out"),
    }
}
