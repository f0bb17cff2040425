use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::tables::client as f;

/// The quote's recipient. `Default` is the all-"N/A" client used when no
/// linked record resolves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub address: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: Option<String>,
    pub municipality: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub tax_id: Option<String>,
}

impl ClientInfo {
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.text(f::NAME),
            address: record.text(f::ADDRESS),
            house_number: record.text(f::HOUSE_NUMBER),
            postal_code: record.text(f::POSTAL_CODE),
            municipality: record.text(f::MUNICIPALITY),
            province: record.text(f::PROVINCE),
            country: record.text(f::COUNTRY),
            tax_id: record.text(f::TAX_ID),
        }
    }
}
