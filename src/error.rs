use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use compute::error::ComputeError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::error;

use crate::schemas::ErrorResponse;

/// Errors returned by HTTP handlers and extractors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request is missing a field or carries an invalid value
    #[error("{0}")]
    Validation(String),

    /// No usable credentials were supplied
    #[error("{0}")]
    Unauthorized(String),

    /// Credentials were supplied but do not grant access
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// A unique value (email, brand name) is already taken
    #[error("{message}")]
    Duplicate { message: String, code: &'static str },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Duplicate { code, .. } => *code,
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Maps a unique-constraint violation to `Duplicate`, anything else to `Database`.
    pub fn from_unique_violation(db_err: DbErr, message: String, code: &'static str) -> Self {
        match db_err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ApiError::Duplicate { message, code },
            _ => ApiError::Database(db_err),
        }
    }
}

impl From<ComputeError> for ApiError {
    fn from(err: ComputeError) -> Self {
        match err {
            ComputeError::Validation(msg) => ApiError::Validation(msg),
            ComputeError::NotFound(msg) => ApiError::NotFound(msg),
            ComputeError::Database(db_err) => ApiError::Database(db_err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details stay in the logs
        let message = match &self {
            ApiError::Database(db_err) => {
                error!("Database error while handling request: {}", db_err);
                "Internal server error".to_string()
            }
            ApiError::Internal(msg) => {
                error!("Internal error while handling request: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error: message,
            code: self.code().to_string(),
            success: false,
        };

        (status, Json(body)).into_response()
    }
}
