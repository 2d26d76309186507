use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZapperError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-2xx answer. The body is kept for logging only.
    #[error("Portfolio API answered with status {status}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("GraphQL errors: {0}")]
    GraphQlErrors(String),

    #[error("Portfolio API response carried no data")]
    MissingData,

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
}
