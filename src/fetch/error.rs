use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {0}")]
    BodyRead(String, #[source] reqwest::Error),

    #[error("Failed to parse JSON data from {0}")]
    JsonParse(String, #[source] serde_json::Error),

    // The record sequence was not an array of objects
    #[error("Unexpected payload shape: {0}")]
    UnexpectedPayload(String),

    #[error("Failed to build observation table from records")]
    FrameBuild(#[source] PolarsError),
}
