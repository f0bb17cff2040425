use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no project found for text domain: {domain_key}")]
    NotFound { domain_key: String },

    #[error("store configuration error: {0}")]
    Configuration(String),

    #[error("store request failed: {0}")]
    Upstream(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
