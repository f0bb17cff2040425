use async_trait::async_trait;
use tracing::debug;

use preventivo_core::record::Record;
use preventivo_core::tables;

use crate::error::StoreError;
use crate::filter::Filter;

/// Read access to the store's tables.
///
/// Implementors provide [`select`](RecordSource::select); the lookups the
/// resolver needs are built on top of it.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Every row of `table` matching `filter` (all rows when `None`), in the
    /// order the store returns them.
    async fn select(&self, table: &str, filter: Option<&Filter>)
    -> Result<Vec<Record>, StoreError>;

    /// Every row of `table`.
    async fn all_records(&self, table: &str) -> Result<Vec<Record>, StoreError> {
        self.select(table, None).await
    }

    /// Rows of `table` whose id is in `ids`. An empty id list returns an empty
    /// result without querying.
    async fn records_by_ids(&self, table: &str, ids: &[String]) -> Result<Vec<Record>, StoreError> {
        if ids.is_empty() {
            debug!(table, "no record ids to fetch");
            return Ok(Vec::new());
        }
        let filter = Filter::RecordIdIn(ids.to_vec());
        self.select(table, Some(&filter)).await
    }

    /// Projects whose domain key equals `domain_key`.
    async fn projects_by_domain(&self, domain_key: &str) -> Result<Vec<Record>, StoreError> {
        let filter = Filter::field_equals(tables::project::DOMAIN_KEY, domain_key);
        self.select(tables::PROJECTS, Some(&filter)).await
    }
}
