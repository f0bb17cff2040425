//! preventivo-export
//!
//! HTML quote documents: template parsing, placeholder population and PDF
//! rendering through headless Chromium.

pub mod error;
pub mod populate;
pub mod render;
pub mod styles;
pub mod template;
