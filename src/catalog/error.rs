use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned status {0}")]
    Status(u16),

    #[error("malformed catalog response: {0}")]
    Malformed(#[from] serde_json::Error),
}
