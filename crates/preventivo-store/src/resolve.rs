//! Project → quote resolution.
//!
//! Looks up the project by domain key, then follows its link lists into the
//! client, task, account and personal tables. Only the project lookup can fail
//! the request; every secondary lookup degrades to "nothing found".

use tracing::{debug, warn};

use preventivo_core::models::account::Account;
use preventivo_core::models::client::ClientInfo;
use preventivo_core::models::project::Project;
use preventivo_core::models::quote::ResolvedQuote;
use preventivo_core::models::supplier::Supplier;
use preventivo_core::models::task::Task;
use preventivo_core::record::Record;
use preventivo_core::tables;

use crate::error::StoreError;
use crate::source::RecordSource;

/// Where to look for the issuing party's record, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierStrategy {
    /// First `personal` record linked from the project.
    LinkedToProject,
    /// First record of the whole `personal` table.
    FirstInTable,
}

/// Default precedence: the project's own link, then any personal record.
pub const SUPPLIER_PRECEDENCE: &[SupplierStrategy] = &[
    SupplierStrategy::LinkedToProject,
    SupplierStrategy::FirstInTable,
];

/// Resolve the quote for `domain_key`.
///
/// Fails with [`StoreError::NotFound`] when no project matches, and propagates
/// errors from the project lookup itself. Duplicate domain keys resolve to the
/// first row the store returns.
pub async fn resolve(
    source: &dyn RecordSource,
    domain_key: &str,
) -> Result<ResolvedQuote, StoreError> {
    debug!(domain_key, "resolving project");

    let rows = source.projects_by_domain(domain_key).await?;
    let Some(row) = rows.first() else {
        return Err(StoreError::NotFound {
            domain_key: domain_key.to_string(),
        });
    };
    if rows.len() > 1 {
        warn!(
            domain_key,
            matches = rows.len(),
            "multiple projects share this domain key, using the first"
        );
    }

    let project = Project::from_record(row);
    debug!(
        project_id = %project.id,
        clients = project.client_ids.len(),
        tasks = project.task_ids.len(),
        accounts = project.account_ids.len(),
        personal = project.supplier_ids.len(),
        "project found"
    );

    let client = resolve_client(source, &project).await;
    let tasks = linked_records(source, tables::TASKS, &project.task_ids)
        .await
        .iter()
        .map(Task::from_record)
        .collect();
    let accounts = linked_records(source, tables::ACCOUNTS, &project.account_ids)
        .await
        .iter()
        .map(Account::from_record)
        .collect();
    let supplier = resolve_supplier(source, &project, SUPPLIER_PRECEDENCE).await;

    Ok(ResolvedQuote {
        domain_key: domain_key.to_string(),
        project,
        client,
        supplier,
        tasks,
        accounts,
    })
}

/// First client linked from the project, or the all-"N/A" client.
pub async fn resolve_client(source: &dyn RecordSource, project: &Project) -> ClientInfo {
    linked_records(source, tables::CLIENTS, &project.client_ids)
        .await
        .first()
        .map(ClientInfo::from_record)
        .unwrap_or_default()
}

/// Evaluate `strategies` in order; the first one producing a record wins.
/// Falls back to the all-"N/A" supplier.
pub async fn resolve_supplier(
    source: &dyn RecordSource,
    project: &Project,
    strategies: &[SupplierStrategy],
) -> Supplier {
    for strategy in strategies {
        if let Some(record) = supplier_candidate(source, project, *strategy).await {
            debug!(?strategy, record_id = %record.id, "supplier resolved");
            return Supplier::from_record(&record);
        }
    }
    debug!("no supplier record found, using defaults");
    Supplier::default()
}

async fn supplier_candidate(
    source: &dyn RecordSource,
    project: &Project,
    strategy: SupplierStrategy,
) -> Option<Record> {
    let rows = match strategy {
        SupplierStrategy::LinkedToProject => {
            linked_records(source, tables::PERSONAL, &project.supplier_ids).await
        }
        SupplierStrategy::FirstInTable => match source.all_records(tables::PERSONAL).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(table = tables::PERSONAL, error = %e, "personal lookup failed");
                Vec::new()
            }
        },
    };
    rows.into_iter().next()
}

/// Rows linked by `ids`; lookup failures are logged and read as no rows.
async fn linked_records(source: &dyn RecordSource, table: &str, ids: &[String]) -> Vec<Record> {
    match source.records_by_ids(table, ids).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(table, error = %e, "linked record lookup failed");
            Vec::new()
        }
    }
}
