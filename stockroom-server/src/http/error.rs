//! API error types with IntoResponse
//!
//! Absence is not an error to clients: missing records and empty lists
//! answer 204 with no body. Everything else is a JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Record missing or list empty (204, no body)
    NoContent,

    /// Validation failed (400)
    Validation(ValidationError),

    /// Duplicate record (409)
    Conflict { message: String },

    /// Blocked delete, unknown reference or rejected input (400)
    BadRequest { message: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NoContent => return StatusCode::NO_CONTENT.into_response(),
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::Conflict { message } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "conflict",
                    "message": message
                }),
            ),
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "bad_request",
                    "message": message
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => Self::NoContent,
            DbError::Conflict { .. } => Self::Conflict {
                message: e.to_string(),
            },
            DbError::BlockedByReference { .. }
            | DbError::InvalidReference { .. }
            | DbError::InvalidInput { .. } => Self::BadRequest {
                message: e.to_string(),
            },
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(DbError::Sqlx(e))
    }
}

/// Answer a list with 200, or 204 when it is empty.
pub fn non_empty<T>(rows: Vec<T>) -> Result<Json<Vec<T>>, ApiError> {
    if rows.is_empty() {
        return Err(ApiError::NoContent);
    }
    Ok(Json(rows))
}
