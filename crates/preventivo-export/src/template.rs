//! The quote document template.
//!
//! A plain HTML string with `{{name}}` placeholders. It is parsed once into
//! literal and placeholder segments; every placeholder must be one the
//! populator knows how to fill, so a template can never leave a token
//! unexpanded.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use preventivo_core::format::NOT_AVAILABLE;

use crate::error::ExportError;
use crate::populate::PLACEHOLDERS;

const BUILTIN: &str = include_str!("../templates/preventivo.html");

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
    source_len: usize,
}

impl Template {
    /// Parse `source`, rejecting placeholders the populator cannot fill.
    pub fn parse(source: &str) -> Result<Self, ExportError> {
        let segments = split(source);

        let unknown: BTreeSet<String> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(name) if !PLACEHOLDERS.contains(&name.as_str()) => {
                    Some(name.clone())
                }
                _ => None,
            })
            .collect();
        if !unknown.is_empty() {
            return Err(ExportError::UnknownPlaceholders(unknown.into_iter().collect()));
        }

        Ok(Self {
            segments,
            source_len: source.len(),
        })
    }

    /// Read and parse a template file.
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let source = std::fs::read_to_string(path).map_err(|source| ExportError::TemplateLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// The template bundled with this crate.
    pub fn builtin() -> Result<Self, ExportError> {
        Self::parse(BUILTIN)
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(name) if seen.insert(name.as_str()) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// A copy with the first occurrence of `from` in the literal text replaced
    /// by `to`, or `None` when no literal segment contains it. Placeholder
    /// values are not filled in yet, so they are never matched.
    pub fn replace_literal_once(&self, from: &str, to: &str) -> Option<Self> {
        let index = self
            .segments
            .iter()
            .position(|s| matches!(s, Segment::Literal(text) if text.contains(from)))?;

        let mut segments = self.segments.clone();
        if let Segment::Literal(text) = &mut segments[index] {
            *text = text.replacen(from, to, 1);
        }
        Some(Self {
            segments,
            source_len: self.source_len.saturating_sub(from.len()) + to.len(),
        })
    }

    /// Substitute every placeholder in one pass. Names missing from `values`
    /// render as "N/A".
    pub fn render(&self, values: &BTreeMap<&str, String>) -> String {
        let mut out = String::with_capacity(self.source_len * 2);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    out.push_str(values.get(name.as_str()).map_or(NOT_AVAILABLE, String::as_str))
                }
            }
        }
        out
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Split into literal and placeholder segments. Brace pairs that do not
/// enclose a valid name stay literal.
fn split(source: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = source;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let name = after_open
            .find("}}")
            .map(|close| &after_open[..close])
            .filter(|name| !name.is_empty() && name.chars().all(is_name_char));

        match name {
            Some(name) => {
                literal.push_str(&rest[..open]);
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(name.to_string()));
                rest = &after_open[name.len() + 2..];
            }
            None => {
                // Keep one brace and rescan from the next character.
                literal.push_str(&rest[..=open]);
                rest = &rest[open + 1..];
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}
