//! HTTP error mapping.
//!
//! Every failure is rendered as
//! `{"error": {"category", "message", "status", "fields"?}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use vinyl_core::Error as CoreError;

/// Errors returned by request handlers.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// Failure from the store layer.
    #[error(transparent)]
    Store(#[from] vinyl_store::Error),

    /// Failure from the domain layer.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Nothing matches the request path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request itself is malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An extractor refused the request (bad path segment, body, or query).
    #[error("{message}")]
    Rejected {
        /// Status to answer with.
        status: StatusCode,
        /// What was wrong with the request.
        message: String,
    },
}

/// Handler result alias.
pub type ApiResult<T> = Result<T, ApiError>;

fn classify_core(err: &CoreError) -> (StatusCode, &'static str) {
    match err {
        CoreError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        CoreError::InvalidPromoCode => (StatusCode::BAD_REQUEST, "promo_code"),
        CoreError::Forbidden { .. } => (StatusCode::FORBIDDEN, "forbidden"),
        CoreError::Conflict { .. } => (StatusCode::BAD_REQUEST, "conflict"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    }
}

impl ApiError {
    fn core(&self) -> Option<&CoreError> {
        match self {
            ApiError::Store(e) => e.as_core(),
            ApiError::Core(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status and error category.
    pub fn classify(&self) -> (StatusCode, &'static str) {
        if let Some(core) = self.core() {
            return classify_core(core);
        }
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Rejected { status, .. } if *status == StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                (*status, "unsupported_media_type")
            }
            ApiError::Rejected { status, .. } if status.is_server_error() => (*status, "internal"),
            ApiError::Rejected { .. } => (StatusCode::BAD_REQUEST, "bad_request"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, category) = self.classify();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let mut error = json!({
            "category": category,
            "message": self.to_string(),
            "status": status.as_u16(),
        });
        if let Some(CoreError::Validation(errors)) = self.core() {
            error["fields"] = json!(errors.fields());
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
