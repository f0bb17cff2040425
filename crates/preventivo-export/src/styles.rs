use serde::{Deserialize, Serialize};

/// Background class marking highlighted table rows.
pub const HIGHLIGHT_CLASS: &str = "bg-slate-100";

/// Forces backgrounds (row highlights included) into print output.
const COLOR_STYLES: &str = r#"
    <style>
      * {
        -webkit-print-color-adjust: exact !important;
        print-color-adjust: exact !important;
      }
      .bg-slate-100 {
        background-color: #f1f5f9 !important;
      }
    </style>
  "#;

/// Zero page margins and keeps the main container on a single page.
const PAGE_STYLES: &str = r#"
    <style>
      @page { size: auto; margin: 0; }
      body { margin: 0; padding: 0; }
      * { -webkit-print-color-adjust: exact !important; }
      .no-break { page-break-inside: avoid !important; }
    </style>
  "#;

const CONTAINER_OPEN: &str = r#"<div id="container""#;
const CONTAINER_NO_BREAK: &str = r#"<div id="container" class="no-break""#;

/// Add print-safety styling: style blocks before `</head>` and the `no-break`
/// class on the main container. Each step is a no-op when its anchor is
/// missing.
pub fn inject_print_safety(html: &str) -> String {
    let html = insert_before_head_close(html, COLOR_STYLES);
    let html = insert_before_head_close(&html, PAGE_STYLES);
    html.replacen(CONTAINER_OPEN, CONTAINER_NO_BREAK, 1)
}

/// Insert `fragment` immediately before the first `</head>`.
pub fn insert_before_head_close(html: &str, fragment: &str) -> String {
    match html.find("</head>") {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + fragment.len());
            out.push_str(&html[..pos]);
            out.push_str(fragment);
            out.push_str(&html[pos..]);
            out
        }
        None => html.to_string(),
    }
}

/// Physical page geometry of the rendered PDF.
///
/// Pages are a fixed width and as tall as the content, so the whole quote
/// prints on one page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width in millimetres.
    pub width_mm: f64,

    /// Viewport width in CSS pixels used while measuring, matching `width_mm`.
    pub viewport_width_px: u32,

    /// Added below the measured content height.
    pub extra_height_px: u32,

    /// Height used when the content could not be measured.
    pub fallback_height_px: u32,

    /// Largest page the browser will emit (200in at 96dpi).
    pub max_height_px: u32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            viewport_width_px: 794,
            extra_height_px: 100,
            fallback_height_px: 1123,
            max_height_px: 19_200,
        }
    }
}

impl PageGeometry {
    /// Page height for content measured at `content_px`.
    pub fn page_height_px(&self, content_px: Option<u32>) -> u32 {
        match content_px {
            Some(h) => h.saturating_add(self.extra_height_px).min(self.max_height_px),
            None => self.fallback_height_px,
        }
    }

    /// `@page` rule sizing the document to `height_px`.
    pub fn page_rule(&self, height_px: u32) -> String {
        format!(
            "<style>@page {{ size: {}mm {}px; margin: 0; }}</style>",
            self.width_mm, height_px
        )
    }
}
