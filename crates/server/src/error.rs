//! Mapping of query failures onto HTTP responses.

use crate::protocol::ErrorBody;
use atxtraffic::TrafficError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

#[derive(Debug)]
pub enum ApiError {
    Query(TrafficError),
    /// A query task panicked or was cancelled.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Query(err) if err.is_caller_error() => StatusCode::BAD_REQUEST,
            ApiError::Query(TrafficError::ColumnNotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Query(err) => err.to_string(),
            ApiError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<TrafficError> for ApiError {
    fn from(err: TrafficError) -> Self {
        ApiError::Query(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Internal error: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status, message);
        } else {
            warn!("Request rejected ({}): {}", status, message);
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
