//! # Application Error
//!
//! Maps domain errors to structured HTTP responses with proper status
//! codes and error bodies. Conflict-family domain errors (custody,
//! admission, deletion) all map to 409 with the domain message intact;
//! internal storage errors map to an opaque 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use custos_access::AdmissionError;
use custos_registry::CustodyError;

/// Application-level error type that maps to HTTP responses.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Caller identity missing or malformed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Insufficient permissions.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Request conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error. The detail is logged, never sent to the
    /// client — the display form stays opaque.
    #[error("internal error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            tracing::error!(detail = %detail, "internal error");
        }
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({
            "error": {
                "code": status.as_u16(),
                "message": self.to_string(),
            }
        });
        (status, axum::Json(body)).into_response()
    }
}

impl From<CustodyError> for AppError {
    fn from(err: CustodyError) -> Self {
        match err {
            CustodyError::Validation { .. } => Self::Validation(err.to_string()),
            CustodyError::NotFound { .. } => Self::NotFound(err.to_string()),
            CustodyError::Permission { .. } => Self::Forbidden(err.to_string()),
            CustodyError::InvalidTransition { .. }
            | CustodyError::TerminalState { .. }
            | CustodyError::CustodyConflict { .. }
            | CustodyError::HistoryRetained { .. } => Self::Conflict(err.to_string()),
            CustodyError::Storage(detail) => Self::Internal(detail),
        }
    }
}

impl From<AdmissionError> for AppError {
    fn from(err: AdmissionError) -> Self {
        match err {
            AdmissionError::Validation { .. } => Self::Validation(err.to_string()),
            AdmissionError::NotFound { .. } => Self::NotFound(err.to_string()),
            AdmissionError::Permission => Self::Forbidden(err.to_string()),
            AdmissionError::DuplicatePending { .. }
            | AdmissionError::UsernameTaken { .. }
            | AdmissionError::AlreadyReviewed { .. } => Self::Conflict(err.to_string()),
            AdmissionError::Storage(detail) => Self::Internal(detail),
        }
    }
}
