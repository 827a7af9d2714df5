//! # Extraction Helpers
//!
//! Handlers take `Result<Json<T>, JsonRejection>` instead of `Json<T>` so
//! that malformed bodies are reported through the error envelope rather
//! than axum's plain-text rejection.
//!
//! ```ignore
//! async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
//!     let req = extract_json(body)?;
//! }
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;

use crate::error::AppError;

/// Unwrap a JSON body, mapping rejections to `MalformedInput`.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result.map(|Json(v)| v).map_err(AppError::from)
}

/// Unwrap query parameters, mapping rejections to `MalformedInput`.
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result.map(|Query(v)| v).map_err(AppError::from)
}
