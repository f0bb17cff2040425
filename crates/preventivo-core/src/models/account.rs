use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::tables::account as f;

/// A recurring subscription or service billed yearly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub service: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub annual_amount: Option<String>,
}

impl Account {
    pub fn from_record(record: &Record) -> Self {
        Self {
            service: record.text(f::SERVICE),
            category: record.text(f::CATEGORY),
            description: record.text(f::DESCRIPTION),
            annual_amount: record.text(f::ANNUAL_AMOUNT),
        }
    }
}
