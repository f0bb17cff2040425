use serde::{Deserialize, Serialize};

use super::account::Account;
use super::client::ClientInfo;
use super::project::Project;
use super::supplier::Supplier;
use super::task::Task;

/// Everything the document needs, resolved from the store for one request.
/// Every field is addressable by a template placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedQuote {
    /// The key the request asked for.
    pub domain_key: String,
    pub project: Project,
    pub client: ClientInfo,
    pub supplier: Supplier,
    pub tasks: Vec<Task>,
    pub accounts: Vec<Account>,
}

impl ResolvedQuote {
    /// The key used for file names: the project's own domain key when it has
    /// one, otherwise the requested key.
    pub fn file_key(&self) -> &str {
        self.project
            .domain_key
            .as_deref()
            .unwrap_or(&self.domain_key)
    }
}
