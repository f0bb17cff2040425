//! Row predicates, rendered to the store's formula language or evaluated in
//! memory.

use preventivo_core::record::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `{field}='value'`
    FieldEquals { field: String, value: String },
    /// Record id is one of the given ids.
    RecordIdIn(Vec<String>),
}

impl Filter {
    pub fn field_equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::FieldEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Render as an Airtable `filterByFormula` expression.
    pub fn to_formula(&self) -> String {
        match self {
            Filter::FieldEquals { field, value } => {
                format!("{{{field}}}='{}'", escape(value))
            }
            Filter::RecordIdIn(ids) => {
                let parts: Vec<String> = ids
                    .iter()
                    .map(|id| format!("RECORD_ID()='{}'", escape(id)))
                    .collect();
                match parts.as_slice() {
                    [single] => single.clone(),
                    _ => format!("OR({})", parts.join(",")),
                }
            }
        }
    }

    /// Evaluate against a row already in memory.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::FieldEquals { field, value } => {
                record.text(field).is_some_and(|v| v == *value)
            }
            Filter::RecordIdIn(ids) => ids.iter().any(|id| *id == record.id),
        }
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
