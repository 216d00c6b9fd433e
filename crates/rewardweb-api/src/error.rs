//! Error types for rewardweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rewardweb_core::{CoreError, ErrorCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e.code() {
                ErrorCode::InvalidFilter => StatusCode::BAD_REQUEST,
                ErrorCode::NotLoaded | ErrorCode::Loading => StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::FetchFailure | ErrorCode::MalformedRecord => StatusCode::BAD_GATEWAY,
            },
            ApiError::Bind { .. } | ApiError::Serve(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body with the core error details
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::Core(e) => serde_json::to_string(&e.to_details()).unwrap_or_default(),
            other => serde_json::json!({ "message": other.to_string() }).to_string(),
        };
        (
            self.status(),
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let bad = ApiError::from(CoreError::InvalidFilter {
            field: "from".to_string(),
            value: "x".to_string(),
        });
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(CoreError::Loading).status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            ApiError::from(CoreError::FetchFailure {
                message: "Failed to fetch data".to_string()
            })
            .status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
