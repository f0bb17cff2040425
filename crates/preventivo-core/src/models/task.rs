use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::tables::task as f;

/// A billable line item ("lavorazione").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub label: Option<String>,
    pub description: Option<String>,
    pub gross: Option<String>,
}

impl Task {
    pub fn from_record(record: &Record) -> Self {
        Self {
            label: record.text(f::LABEL),
            description: record.text(f::DESCRIPTION),
            gross: record.text(f::GROSS),
        }
    }
}
