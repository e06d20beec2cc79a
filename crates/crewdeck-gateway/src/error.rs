//! API error types and responses.
//!
//! This module defines the standard error format for all API responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crewdeck_auth::AuthError;
use crewdeck_directory::DirectoryError;
use crewdeck_errlog::LogError;
use crewdeck_report::ReportError;
use crewdeck_store::StoreError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, invalid, or expired session token, or bad credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// The identity is not allowed to perform this action.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request conflicts with the current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Invalid request body or parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request was well-formed but failed a validation rule.
    #[error("unprocessable: {0}")]
    Unprocessable(String),

    /// An upstream service failed.
    #[error("upstream failure: {0}")]
    UpstreamFailed(String),

    /// An upstream service exceeded its deadline.
    #[error("upstream timeout: {0}")]
    UpstreamTimeout(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Error details.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UpstreamFailed(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::BadRequest(_) => "bad_request",
            Self::Unprocessable(_) => "unprocessable",
            Self::UpstreamFailed(_) => "upstream_failed",
            Self::UpstreamTimeout(_) => "upstream_timeout",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized,
            AuthError::Unmapped(email) => Self::Forbidden(format!("no agents mapped for {email}")),
            AuthError::AlreadyExists => Self::Conflict("account already exists".to_string()),
            AuthError::InvalidDomain { .. } | AuthError::PasswordMismatch => {
                Self::Unprocessable(err.to_string())
            }
            AuthError::Store(store_err) => {
                tracing::error!(error = %store_err, "Store error");
                Self::Internal("storage error".to_string())
            }
        }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NoAgentsMapped(email) => {
                Self::Forbidden(format!("no agents mapped for {email}"))
            }
            DirectoryError::Missing(_) | DirectoryError::Io(_) | DirectoryError::Parse(_) => {
                tracing::error!(error = %err, "Directory error");
                Self::Internal("directory error".to_string())
            }
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::NoSelection => Self::Unprocessable("no agents selected".to_string()),
            ReportError::ViewNotFound(_) | ReportError::NoData => Self::NotFound(err.to_string()),
            ReportError::Timeout(_) => Self::UpstreamTimeout(err.to_string()),
            ReportError::MetricsSource(_) | ReportError::Summarizer(_) | ReportError::Decode(_) => {
                Self::UpstreamFailed(err.to_string())
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Store error");
        Self::Internal("storage error".to_string())
    }
}

impl From<LogError> for ApiError {
    fn from(err: LogError) -> Self {
        tracing::error!(error = %err, "Error log failure");
        Self::Internal("error log failure".to_string())
    }
}
