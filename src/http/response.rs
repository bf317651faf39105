//! Response bodies and error mapping.
//!
//! # Design Decisions
//! - Every failure leaves as `{"error": "<message>"}`
//! - Status comes from the error kind: validation → 400, missing → 404
//! - Only the store error's public message is exposed

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::store::StoreError;

/// `{"error": ...}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `{"message": ...}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error returned by product handlers.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::NOT_FOUND
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), error = %self.0, "Request rejected");
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(StoreError::MissingFields).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError(StoreError::NotFound).status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError(StoreError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Product not found"}));
    }
}
