//! HTML → PDF rendering.
//!
//! The pipeline only sees the [`Renderer`] trait. [`ChromiumRenderer`] drives
//! a headless Chromium binary as a child process: one measuring pass to find
//! the content height, then one printing pass sized to it.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::ExportError;
use crate::styles::{PageGeometry, insert_before_head_close};

/// Renders a populated HTML document to PDF bytes.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>, ExportError>;

    /// Full-page PNG of `html`, or `None` when the backend cannot take one.
    async fn screenshot(&self, _html: &str) -> Result<Option<Vec<u8>>, ExportError> {
        Ok(None)
    }
}

/// Binaries tried, in order, when no path is configured.
const CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
];

const BASE_ARGS: &[&str] = &[
    "--headless",
    "--disable-gpu",
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--hide-scrollbars",
    "--no-first-run",
    "--no-default-browser-check",
    "--run-all-compositor-stages-before-draw",
];

const HEIGHT_ATTR: &str = "data-content-height";

/// Records the laid-out document height once loading and fonts are done.
const MEASURE_SCRIPT: &str = r#"<script>
window.addEventListener('load', function () {
  var ready = document.fonts ? document.fonts.ready : Promise.resolve();
  ready.then(function () {
    document.documentElement.setAttribute(
      'data-content-height',
      String(document.documentElement.offsetHeight)
    );
  });
});
</script>"#;

pub struct ChromiumRenderer {
    binary: PathBuf,
    geometry: PageGeometry,
    /// Upper bound for each browser invocation.
    timeout: Duration,
    /// Virtual time the page gets to settle (network, fonts) before capture.
    settle: Duration,
}

impl ChromiumRenderer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            geometry: PageGeometry::default(),
            timeout: Duration::from_secs(60),
            settle: Duration::from_secs(10),
        }
    }

    /// Use `configured` when given, otherwise the first known Chromium binary
    /// on `PATH`.
    pub fn discover(configured: Option<PathBuf>) -> Result<Self, ExportError> {
        if let Some(path) = configured {
            return Ok(Self::new(path));
        }
        find_on_path(CANDIDATES).map(Self::new).ok_or_else(|| {
            ExportError::Launch(format!(
                "no Chromium binary found on PATH (tried {})",
                CANDIDATES.join(", ")
            ))
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    async fn measure(&self, workdir: &Path, html: &str) -> Result<Option<u32>, ExportError> {
        let path = workdir.join("measure.html");
        tokio::fs::write(&path, with_measure_script(html)).await?;

        let args = ["--dump-dom".to_string(), file_url(&path)];
        let output = self
            .run(
                workdir,
                self.geometry.fallback_height_px,
                &args,
                ExportError::Navigation,
            )
            .await?;
        let dom = String::from_utf8_lossy(&output.stdout);
        Ok(parse_content_height(&dom))
    }

    /// Measured page height, or the fallback when the page reports none.
    async fn page_height(&self, workdir: &Path, html: &str) -> Result<u32, ExportError> {
        let measured = self.measure(workdir, html).await?;
        if measured.is_none() {
            warn!("content height not reported, using fallback page height");
        }
        let height = self.geometry.page_height_px(measured);
        debug!(?measured, height, "page height computed");
        Ok(height)
    }

    async fn print(&self, workdir: &Path, html: &str) -> Result<Vec<u8>, ExportError> {
        let doc_path = workdir.join("document.html");
        let pdf_path = workdir.join("document.pdf");
        tokio::fs::write(&doc_path, html).await?;

        let args = [
            format!("--print-to-pdf={}", pdf_path.display()),
            "--no-pdf-header-footer".to_string(),
            "--print-to-pdf-no-header".to_string(),
            file_url(&doc_path),
        ];
        self.run(
            workdir,
            self.geometry.fallback_height_px,
            &args,
            ExportError::Rasterize,
        )
        .await?;

        let pdf = tokio::fs::read(&pdf_path)
            .await
            .map_err(|e| ExportError::Rasterize(format!("no PDF written: {e}")))?;
        if !pdf.starts_with(b"%PDF") {
            return Err(ExportError::Rasterize("output is not a PDF".to_string()));
        }
        Ok(pdf)
    }

    /// Run one browser invocation with a `window_height_px` tall viewport.
    /// The child is killed if it outlives `timeout` or if this future is
    /// dropped.
    async fn run(
        &self,
        workdir: &Path,
        window_height_px: u32,
        args: &[String],
        on_failure: fn(String) -> ExportError,
    ) -> Result<std::process::Output, ExportError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(BASE_ARGS)
            .arg(format!("--user-data-dir={}", workdir.join("profile").display()))
            .arg(format!(
                "--window-size={},{}",
                self.geometry.viewport_width_px, window_height_px
            ))
            .arg(format!("--virtual-time-budget={}", self.settle.as_millis()))
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| ExportError::Launch(format!("{}: {e}", self.binary.display())))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ExportError::Timeout(self.timeout))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(on_failure(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }
        Ok(output)
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, ExportError> {
        // Removed on drop, whichever way this function exits.
        let workdir = tempfile::tempdir()?;

        let height = self.page_height(workdir.path(), html).await?;

        let rule = self.geometry.page_rule(height);
        let document = if html.contains("</head>") {
            insert_before_head_close(html, &rule)
        } else {
            format!("{rule}{html}")
        };

        let pdf = self.print(workdir.path(), &document).await?;
        debug!(bytes = pdf.len(), "PDF rendered");
        Ok(pdf)
    }

    async fn screenshot(&self, html: &str) -> Result<Option<Vec<u8>>, ExportError> {
        let workdir = tempfile::tempdir()?;
        let height = self.page_height(workdir.path(), html).await?;

        let doc_path = workdir.path().join("screenshot.html");
        let png_path = workdir.path().join("screenshot.png");
        tokio::fs::write(&doc_path, html).await?;

        let args = [
            format!("--screenshot={}", png_path.display()),
            file_url(&doc_path),
        ];
        self.run(workdir.path(), height, &args, ExportError::Rasterize)
            .await?;

        let png = tokio::fs::read(&png_path)
            .await
            .map_err(|e| ExportError::Rasterize(format!("no screenshot written: {e}")))?;
        Ok(Some(png))
    }
}

/// Read the height recorded by the measuring script from a dumped DOM.
pub fn parse_content_height(dom: &str) -> Option<u32> {
    let marker = format!("{HEIGHT_ATTR}=\"");
    let start = dom.find(&marker)? + marker.len();
    let digits: String = dom[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn with_measure_script(html: &str) -> String {
    match html.rfind("</body>") {
        Some(pos) => format!("{}{MEASURE_SCRIPT}{}", &html[..pos], &html[pos..]),
        None => format!("{html}{MEASURE_SCRIPT}"),
    }
}

fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

fn find_on_path(names: &[&str]) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    let dirs: Vec<PathBuf> = std::env::split_paths(&path).collect();
    names
        .iter()
        .flat_map(|name| dirs.iter().map(move |dir| dir.join(name)))
        .find(|candidate| candidate.is_file())
}
