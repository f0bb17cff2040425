use std::collections::HashMap;

use async_trait::async_trait;

use preventivo_core::record::Record;

use crate::error::StoreError;
use crate::filter::Filter;
use crate::source::RecordSource;

/// A [`RecordSource`] over rows held in memory.
///
/// Filters are evaluated with [`Filter::matches`]; unknown tables are empty.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: HashMap<String, Vec<Record>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` to `table`.
    pub fn with_record(mut self, table: &str, record: Record) -> Self {
        self.insert(table, record);
        self
    }

    pub fn insert(&mut self, table: &str, record: Record) {
        self.tables.entry(table.to_string()).or_default().push(record);
    }
}

#[async_trait]
impl RecordSource for InMemorySource {
    async fn select(
        &self,
        table: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Record>, StoreError> {
        let rows = self.tables.get(table).map(Vec::as_slice).unwrap_or(&[]);
        Ok(rows
            .iter()
            .filter(|r| filter.is_none_or(|f| f.matches(r)))
            .cloned()
            .collect())
    }
}
