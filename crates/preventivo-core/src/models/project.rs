use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::tables::project as f;

/// The root quote record, identified by its domain key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub domain_key: Option<String>,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub gross: Option<String>,
    pub annual_costs: Option<String>,
    pub gross_plus_costs: Option<String>,
    pub best_price: Option<String>,
    pub discount: Option<String>,
    pub delivery_time: Option<String>,
    pub payment_terms: Option<String>,
    pub deposit_percent: Option<String>,
    pub deposit: Option<String>,

    // Links into the other tables, in store order.
    pub client_ids: Vec<String>,
    pub task_ids: Vec<String>,
    pub account_ids: Vec<String>,
    pub supplier_ids: Vec<String>,
}

impl Project {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            domain_key: record.text(f::DOMAIN_KEY),
            title: record.text(f::TITLE),
            subject: record.text(f::SUBJECT),
            gross: record.text(f::GROSS),
            annual_costs: record.text(f::ANNUAL_COSTS),
            gross_plus_costs: record.text(f::GROSS_PLUS_COSTS),
            best_price: record.text(f::BEST_PRICE),
            discount: record.text(f::DISCOUNT),
            delivery_time: record.text(f::DELIVERY_TIME),
            payment_terms: record.text(f::PAYMENT_TERMS),
            deposit_percent: record.text(f::DEPOSIT_PERCENT),
            deposit: record.text(f::DEPOSIT),
            client_ids: record.ids(f::CLIENT_LINKS),
            task_ids: record.ids(f::TASK_LINKS),
            account_ids: record.ids(f::ACCOUNT_LINKS),
            supplier_ids: record.ids(f::PERSONAL_LINKS),
        }
    }
}
