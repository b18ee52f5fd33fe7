//! Error type shared by services and handlers.
//!
//! Services return [`AppError`]; axum turns it into a JSON error response.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::common::{AggregateRoot, FieldError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed a field contract; nothing was written
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    /// Referenced ticket or comment does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Connection or transaction failure; the transaction was rolled back
    #[error("Database error: {0}")]
    Store(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(anyhow::Error),
}

impl AppError {
    pub fn not_found<T: AggregateRoot>() -> Self {
        AppError::NotFound(T::element_name())
    }

    pub fn invalid_fields(fields: Vec<FieldError>) -> Self {
        let message = fields
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation { message, fields }
    }

    /// Malformed input that cannot be pinned to a single field
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Vec<FieldError>> for AppError {
    fn from(fields: Vec<FieldError>) -> Self {
        AppError::invalid_fields(fields)
    }
}

/// Repositories report through `anyhow`; database failures keep their store
/// classification.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<sea_orm::DbErr>() {
            Ok(db_err) => AppError::Store(db_err),
            Err(other) => AppError::Internal(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_input(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::invalid_input(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::invalid_input(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation { message, fields } => json!({
                "code": "VALIDATION_ERROR",
                "message": message,
                "fields": fields,
            }),
            AppError::NotFound(_) => json!({
                "code": "NOT_FOUND",
                "message": self.to_string(),
            }),
            AppError::Store(e) => {
                tracing::error!("Store error: {}", e);
                json!({
                    "code": "STORE_ERROR",
                    "message": "Database error",
                })
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                json!({
                    "code": "INTERNAL_SERVER_ERROR",
                    "message": "Internal server error",
                })
            }
        };
        (status, Json(body)).into_response()
    }
}
