//! Airtable REST client.
//!
//! Thin wrapper over `GET /v0/{base}/{table}` with formula filtering and
//! offset pagination.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use preventivo_core::artifacts::DebugArtifacts;
use preventivo_core::record::Record;
use preventivo_core::tables;

use crate::error::StoreError;
use crate::filter::Filter;
use crate::source::RecordSource;

pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// Connection settings. Credentials are optional here and checked on first
/// use, so a misconfigured process still starts and reports the problem per
/// request.
#[derive(Debug, Clone)]
pub struct AirtableConfig {
    pub api_url: String,
    pub base_id: Option<String>,
    pub token: Option<String>,
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            base_id: None,
            token: None,
        }
    }
}

/// One page of a list response.
#[derive(Debug, Deserialize)]
struct ListPage {
    #[serde(default)]
    records: Vec<Record>,
    offset: Option<String>,
}

pub struct AirtableClient {
    http: reqwest::Client,
    config: AirtableConfig,
    artifacts: DebugArtifacts,
}

impl AirtableClient {
    pub fn new(config: AirtableConfig, artifacts: DebugArtifacts) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            artifacts,
        }
    }

    fn table_url(&self, table: &str) -> Result<(Url, &str), StoreError> {
        let base_id = self
            .config
            .base_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| StoreError::Configuration("AIRTABLE_BASE_ID is not set".into()))?;
        let token = self
            .config
            .token
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| StoreError::Configuration("AIRTABLE_API_KEY is not set".into()))?;

        let mut url = Url::parse(&self.config.api_url).map_err(|e| {
            StoreError::Configuration(format!("invalid API url {}: {e}", self.config.api_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                StoreError::Configuration(format!("invalid API url {}", self.config.api_url))
            })?
            .pop_if_empty()
            .push(base_id)
            .push(table);

        Ok((url, token))
    }

    async fn fetch_page(
        &self,
        url: &Url,
        token: &str,
        formula: Option<&str>,
        offset: Option<&str>,
    ) -> Result<ListPage, StoreError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(f) = formula {
            query.push(("filterByFormula", f));
        }
        if let Some(o) = offset {
            query.push(("offset", o));
        }

        let resp = self
            .http
            .get(url.clone())
            .bearer_auth(token)
            .query(&query)
            .send()
            .await
            .map_err(|e| StoreError::Upstream(format!("request to {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Upstream(format!("store returned {status}: {body}")));
        }

        resp.json::<ListPage>()
            .await
            .map_err(|e| StoreError::Upstream(format!("failed to decode store response: {e}")))
    }
}

/// Name of the debug artifact holding a raw response.
fn artifact_name(table: &str, filter: Option<&Filter>) -> String {
    match filter {
        Some(Filter::FieldEquals { value, .. }) if table == tables::PROJECTS => {
            format!("project_{value}")
        }
        Some(_) => format!("{table}_records"),
        None => format!("all_{table}"),
    }
}

#[async_trait]
impl RecordSource for AirtableClient {
    async fn select(
        &self,
        table: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Record>, StoreError> {
        let (url, token) = self.table_url(table)?;
        let formula = filter.map(Filter::to_formula);
        debug!(table, formula = formula.as_deref().unwrap_or(""), "querying store");

        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let page = self
                .fetch_page(&url, token, formula.as_deref(), offset.as_deref())
                .await?;
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        debug!(table, count = records.len(), "store query complete");
        self.artifacts
            .save_response(&artifact_name(table, filter), &records);
        Ok(records)
    }
}
