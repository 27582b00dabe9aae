// src/error.rs

use thiserror::Error;

/// Everything that can go wrong while loading one sheet.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid sheet URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response is not wrapped in google.visualization.Query.setResponse(...)")]
    Framing,

    #[error("malformed gviz payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("upstream query error: {0}")]
    Upstream(String),

    #[error("gviz payload has no table")]
    MissingTable,
}
