//! HTTP error responses.

use axum::Json;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use superstore::PredictError;
use thiserror::Error;

/// Errors returned by the handlers.
#[derive(Debug, Error)]
pub enum WebError {
    /// The order was rejected
    #[error(transparent)]
    Predict(#[from] PredictError),

    /// The request body could not be read as an order
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A page failed to render
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,

    /// Machine-readable kind
    pub kind: &'static str,
}

impl WebError {
    /// HTTP status for this error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Predict(PredictError::Model(_)) | Self::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Predict(_) | Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Short machine-readable kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Predict(e) => e.kind(),
            Self::InvalidRequest(_) => "invalid_request",
            Self::Template(_) => "template",
        }
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<FormRejection> for WebError {
    fn from(rejection: FormRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use superstore::encoding::{EncodingError, Field};

    #[test]
    fn test_unknown_category_is_unprocessable() {
        let err = WebError::from(PredictError::from(EncodingError::unknown(
            Field::Region,
            "North",
        )));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind(), "unknown_category");
    }

    #[test]
    fn test_invalid_request_is_unprocessable() {
        let err = WebError::InvalidRequest("quantity: invalid digit".to_string());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind(), "invalid_request");
        assert_eq!(err.to_string(), "Invalid request: quantity: invalid digit");
    }

    #[test]
    fn test_template_error_is_server_error() {
        let err = WebError::from(tera::Error::msg("broken"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
