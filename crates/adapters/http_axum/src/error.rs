//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use zigview_domain::error::ZigviewError;

/// JSON error body returned by API endpoints. The `type` discriminator is
/// only present on server-side failures, matching the API contract.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl ErrorBody {
    /// Body without a `type` discriminator (404-style errors).
    #[must_use]
    pub fn plain(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind: None,
        }
    }
}

/// Maps [`ZigviewError`] to an HTTP response with appropriate status code.
///
/// Store internals (query text, parameters) stay in the logs; clients get a
/// generic message and a `type` discriminator.
pub struct ApiError(ZigviewError);

impl From<ZigviewError> for ApiError {
    fn from(err: ZigviewError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            ZigviewError::NotFound(err) => {
                (StatusCode::NOT_FOUND, ErrorBody::plain(err.to_string()))
            }
            ZigviewError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Database connection error. Please check if deCONZ is running."
                            .to_string(),
                        kind: Some("database_error"),
                    },
                )
            }
            ZigviewError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "An unexpected error occurred. Please try again.".to_string(),
                        kind: Some("internal_error"),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
