use axum::{Json, http::StatusCode, response::IntoResponse};
use mento_portfolio::NormalizeError;
use mento_zapper::ZapperError;
use thiserror::Error;

use crate::dto::ErrorResponse;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("Failed to fetch reserve data")]
    FetchFailed,
    #[error("{0}")]
    NotFound(String),
}

impl From<ZapperError> for ApiError {
    fn from(err: ZapperError) -> Self {
        // NOTE: upstream details are logged where the error happens and never reach clients
        match err {
            ZapperError::HttpError(_)
            | ZapperError::UnexpectedStatus { .. }
            | ZapperError::GraphQlErrors(_)
            | ZapperError::MissingData
            | ZapperError::JsonError(_) => Self::FetchFailed,
        }
    }
}

impl From<NormalizeError> for ApiError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::MissingPortfolio => Self::FetchFailed,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Self::FetchFailed => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
