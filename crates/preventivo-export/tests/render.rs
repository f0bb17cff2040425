#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use preventivo_export::error::ExportError;
use preventivo_export::render::{ChromiumRenderer, Renderer};

/// Shared argument parsing for the fake browser: which pass is running, the
/// output file it was asked to write and the document it was given.
const PARSE_ARGS: &str = r#"
for arg in "$@"; do
  case "$arg" in
    --dump-dom) mode=dump ;;
    --print-to-pdf=*) mode=print; out="${arg#--print-to-pdf=}" ;;
    --screenshot=*) mode=shot; out="${arg#--screenshot=}" ;;
    file://*) doc="${arg#file://}" ;;
  esac
done
"#;

const DOCUMENT: &str = "<html><head><title>q</title></head><body><p>Preventivo</p></body></html>";

/// Write an executable stand-in for Chromium running `body` after argument
/// parsing. `CAPTURE` in `body` is replaced by `dir`.
fn fake_browser(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-chromium");
    let script = format!(
        "#!/bin/sh\n{PARSE_ARGS}\n{}\n",
        body.replace("CAPTURE", &dir.display().to_string())
    );
    std::fs::write(&path, script).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

const WORKING: &str = r#"
case "$mode" in
  dump) echo '<html data-content-height="500"><body></body></html>' ;;
  print) cp "$doc" "CAPTURE/printed.html"; printf '%%PDF-1.4 fake' > "$out" ;;
  shot) echo "$@" > "CAPTURE/shot_args"; printf 'PNG' > "$out" ;;
esac
"#;

#[tokio::test]
async fn page_is_sized_to_measured_content() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = ChromiumRenderer::new(fake_browser(dir.path(), WORKING));

    let pdf = renderer.render(DOCUMENT).await.unwrap();
    assert!(pdf.starts_with(b"%PDF"));

    let printed = std::fs::read_to_string(dir.path().join("printed.html")).unwrap();
    assert!(printed.contains("<style>@page { size: 210mm 600px; margin: 0; }</style></head>"));
    assert!(printed.contains("<p>Preventivo</p>"));
    assert!(!printed.contains("data-content-height"));
}

#[tokio::test]
async fn unmeasured_page_uses_fallback_height() {
    let dir = tempfile::tempdir().unwrap();
    let browser = fake_browser(
        dir.path(),
        r#"
case "$mode" in
  dump) echo '<html><body></body></html>' ;;
  print) cp "$doc" "CAPTURE/printed.html"; printf '%%PDF-1.4' > "$out" ;;
esac
"#,
    );

    ChromiumRenderer::new(browser).render(DOCUMENT).await.unwrap();

    let printed = std::fs::read_to_string(dir.path().join("printed.html")).unwrap();
    assert!(printed.contains("@page { size: 210mm 1123px; margin: 0; }"));
}

#[tokio::test]
async fn missing_binary_is_a_launch_error() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = ChromiumRenderer::new(dir.path().join("no-such-browser"));

    let err = renderer.render(DOCUMENT).await.unwrap_err();
    assert!(matches!(err, ExportError::Launch(_)), "{err:?}");
    assert!(err.is_render_failure());
}

#[tokio::test]
async fn failed_load_is_a_navigation_error() {
    let dir = tempfile::tempdir().unwrap();
    let browser = fake_browser(dir.path(), "echo 'net::ERR_FILE_NOT_FOUND' >&2\nexit 3");

    let err = ChromiumRenderer::new(browser).render(DOCUMENT).await.unwrap_err();
    match err {
        ExportError::Navigation(detail) => assert!(detail.contains("ERR_FILE_NOT_FOUND")),
        other => panic!("expected a navigation error, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_print_is_a_rasterize_error() {
    let dir = tempfile::tempdir().unwrap();
    let browser = fake_browser(
        dir.path(),
        r#"
case "$mode" in
  dump) echo '<html data-content-height="500"></html>' ;;
  print) echo 'printing failed' >&2; exit 1 ;;
esac
"#,
    );

    let err = ChromiumRenderer::new(browser).render(DOCUMENT).await.unwrap_err();
    match err {
        ExportError::Rasterize(detail) => assert!(detail.contains("printing failed")),
        other => panic!("expected a rasterize error, got {other:?}"),
    }
}

#[tokio::test]
async fn output_that_is_not_a_pdf_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let browser = fake_browser(
        dir.path(),
        r#"
case "$mode" in
  dump) echo '<html data-content-height="500"></html>' ;;
  print) printf 'hello' > "$out" ;;
esac
"#,
    );

    let err = ChromiumRenderer::new(browser).render(DOCUMENT).await.unwrap_err();
    assert!(matches!(err, ExportError::Rasterize(_)), "{err:?}");
}

#[tokio::test]
async fn print_without_output_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let browser = fake_browser(
        dir.path(),
        r#"
case "$mode" in
  dump) echo '<html data-content-height="500"></html>' ;;
esac
"#,
    );

    let err = ChromiumRenderer::new(browser).render(DOCUMENT).await.unwrap_err();
    match err {
        ExportError::Rasterize(detail) => assert!(detail.contains("no PDF written")),
        other => panic!("expected a rasterize error, got {other:?}"),
    }
}

#[tokio::test]
async fn stalled_browser_is_killed_at_the_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let browser = fake_browser(dir.path(), "exec sleep 30");
    let renderer = ChromiumRenderer::new(browser).with_timeout(Duration::from_millis(300));

    let started = Instant::now();
    let err = renderer.render(DOCUMENT).await.unwrap_err();

    assert!(matches!(err, ExportError::Timeout(t) if t == Duration::from_millis(300)));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn screenshot_covers_the_whole_page() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = ChromiumRenderer::new(fake_browser(dir.path(), WORKING));

    let png = renderer.screenshot(DOCUMENT).await.unwrap();
    assert_eq!(png.as_deref(), Some(&b"PNG"[..]));

    let args = std::fs::read_to_string(dir.path().join("shot_args")).unwrap();
    assert!(args.contains("--window-size=794,600"), "{args}");
}
