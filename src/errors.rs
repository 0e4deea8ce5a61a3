use thiserror::Error;

/// Failure to obtain one JSON resource from the data source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch failed: {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("SITE_DATA_URL is not a valid url: {0}")]
    InvalidUrl(String),
}
