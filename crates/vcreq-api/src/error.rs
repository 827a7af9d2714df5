//! # API Error Type
//!
//! [`AppError`] wraps [`VcreqError`] and implements `IntoResponse`. The body is
//! always the [`ErrorEnvelope`] produced by [`to_envelope`], and the HTTP
//! status mirrors its `status` member. Server-side failures are logged
//! before the response is built.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use utoipa::ToSchema;
use vcreq_core::{
    to_envelope, ErrorEnvelope, SerializationError, UnsupportedMethodError, ValidationError,
    VcreqError,
};
use vcreq_did::DidServiceError;

/// OpenAPI schema of the error envelope.
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope)]
pub struct ErrorEnvelopeSchema {
    /// Human-readable error message.
    pub message: String,
    /// HTTP status code, equal to the response status.
    pub status: u16,
}

/// Application-level error returned by every handler.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct AppError(#[from] pub VcreqError);

impl AppError {
    /// The envelope this error is rendered as.
    pub fn envelope(&self) -> ErrorEnvelope {
        to_envelope(&self.0)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let envelope = self.envelope();
        if envelope.is_server_error() {
            tracing::error!(error = %self.0, "internal server error");
        } else {
            tracing::debug!(status = envelope.status, error = %self.0, "request rejected");
        }
        envelope_response(envelope)
    }
}

fn envelope_response(envelope: ErrorEnvelope) -> Response {
    let status =
        StatusCode::from_u16(envelope.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope)).into_response()
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<SerializationError> for AppError {
    fn from(err: SerializationError) -> Self {
        Self(err.into())
    }
}

impl From<UnsupportedMethodError> for AppError {
    fn from(err: UnsupportedMethodError) -> Self {
        Self(err.into())
    }
}

impl From<DidServiceError> for AppError {
    fn from(err: DidServiceError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        Self(VcreqError::malformed(err.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(err: QueryRejection) -> Self {
        Self(VcreqError::malformed(err.body_text()))
    }
}

/// Fallback for unmatched routes.
pub async fn not_found(method: Method, uri: Uri) -> Response {
    envelope_response(ErrorEnvelope {
        message: format!("no route for {method} {}", uri.path()),
        status: StatusCode::NOT_FOUND.as_u16(),
    })
}
