//! Raw rows as the remote store returns them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of a store table: its id plus a loosely typed field map.
///
/// Fields the store considers empty are simply absent from `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            created_time: None,
            fields,
        }
    }

    /// Display text of a field, or `None` when it is absent or empty.
    pub fn text(&self, field: &str) -> Option<String> {
        self.fields.get(field).and_then(field_text)
    }

    /// Linked record ids held by a field.
    pub fn ids(&self, field: &str) -> Vec<String> {
        self.fields.get(field).map(id_list).unwrap_or_default()
    }
}

/// Convert a raw field value into the text inserted into the document.
///
/// Returns `None` for values that count as empty (null, `""`, `false`, zero,
/// empty lists) so callers can substitute their own default.
pub fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => number_text(n),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|v| field_text(v).unwrap_or_default())
                .collect();
            let joined = parts.join(",");
            if joined.is_empty() { None } else { Some(joined) }
        }
        Value::Object(_) => Some(value.to_string()),
    }
}

fn number_text(n: &serde_json::Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return (i != 0).then(|| i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    let f = n.as_f64()?;
    if f == 0.0 || f.is_nan() {
        return None;
    }
    // Integral floats print without a trailing ".0".
    if f.fract() == 0.0 && f.abs() < 1e15 {
        Some(format!("{}", f as i64))
    } else {
        Some(format!("{f}"))
    }
}

/// Extract an id list from a link field.
///
/// Anything other than an array of strings (a scalar from a single-link field,
/// for instance) yields an empty list.
pub fn id_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
