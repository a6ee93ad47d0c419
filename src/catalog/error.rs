//! Error types for catalog lookups.

use thiserror::Error;

/// Errors that can occur while talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request could not be sent or the connection failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("API error: {status} for {url}")]
    Api { status: u16, url: String },

    /// The response body did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The endpoint URL could not be built from the configured base.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
