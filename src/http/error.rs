//! API error type with HTTP response mapping.
//!
//! Booking refusals are not errors, they are rendered as regular pages. Only infrastructure
//! failures end up here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::commands;

#[derive(Debug)]
pub enum ApiError {
    /// Internal server error. The detail is logged, never sent to the client.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<commands::Error> for ApiError {
    fn from(err: commands::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<crate::ports::records::Error> for ApiError {
    fn from(err: crate::ports::records::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::records;
    use speculoos::prelude::*;

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let err = records::Error::Adapter("cannot access /srv/data/clubs.json".into());

        let response = ApiError::from(commands::Error::from(err)).into_response();

        assert_that!(response.status()).is_equal_to(StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_that!(body["error"].as_str()).is_equal_to(Some("internal server error"));
        assert_that!(body.to_string().contains("clubs.json")).is_false();
    }
}
