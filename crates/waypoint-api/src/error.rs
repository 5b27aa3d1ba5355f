// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API error types and the problem response body.
//!
//! [`ApiError`] is the single boundary translator: handlers return
//! `ApiResult<T>`, domain failures arrive as [`CoreError`] through `?`, and
//! `IntoResponse` renders a [`Problem`] body.
//!
//! Authentication failures do not pass through here; the authentication
//! gate renders its own 401 with the same [`Problem`] shape.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use waypoint_core::{CoreError, FieldError, ValidationErrors};

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Problem
// =============================================================================

/// Structured error body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// HTTP status code.
    pub status: u16,
    /// Stable title for the status.
    pub title: &'static str,
    /// Human readable detail.
    pub detail: String,
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
    /// Machine readable code, when the caller's next step depends on it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    /// Request path, set by the authentication gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<FieldError>>,
}

impl Problem {
    /// Creates a problem for `status` with the stable title for it.
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            title: title_for(status),
            detail: detail.into(),
            timestamp: Utc::now(),
            error_code: None,
            path: None,
            validation_errors: None,
        }
    }

    /// Sets the machine readable error code.
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.error_code = Some(code);
        self
    }

    /// Sets the request path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

fn title_for(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::UNAUTHORIZED => "Unauthorized",
        StatusCode::FORBIDDEN => "Forbidden",
        StatusCode::NOT_FOUND => "Not Found",
        StatusCode::CONFLICT => "Conflict",
        StatusCode::REQUEST_TIMEOUT => "Request Timeout",
        _ => "Internal Server Error",
    }
}

// =============================================================================
// ApiError
// =============================================================================

/// API error type with HTTP status code mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404).
    #[error("{message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// Malformed request (400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Caller could not be identified (401).
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Error message.
        message: String,
        /// Machine readable code.
        code: Option<&'static str>,
    },

    /// Caller known but not permitted (403).
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Error message.
        message: String,
    },

    /// Field-level validation failure (400).
    #[error("Validation failed: {errors}")]
    Validation {
        /// Field errors.
        errors: ValidationErrors,
    },

    /// Uniqueness or referential conflict (409).
    #[error("Conflict: {message}")]
    Conflict {
        /// Error message.
        message: String,
    },

    /// Internal server error (500).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message, logged but not returned.
        message: String,
    },
}

impl ApiError {
    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            code: None,
        }
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } | ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` for 5xx errors.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Returns the detail shown to the caller.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotFound { message }
            | ApiError::BadRequest { message }
            | ApiError::Unauthorized { message, .. }
            | ApiError::Forbidden { message }
            | ApiError::Conflict { message } => message.clone(),
            ApiError::Validation { .. } => "Request validation failed".to_string(),
            ApiError::Internal { .. } => "An unexpected error occurred".to_string(),
        }
    }

    /// Builds the problem body for this error.
    pub fn to_problem(&self) -> Problem {
        let mut problem = Problem::new(self.status_code(), self.user_message());
        match self {
            ApiError::Validation { errors } => {
                problem.validation_errors = Some(errors.fields.clone());
            }
            ApiError::Unauthorized {
                code: Some(code), ..
            } => {
                problem.error_code = Some(*code);
            }
            _ => {}
        }
        problem
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!(error = %self, status = %status, "Server error occurred");
        } else {
            tracing::debug!(error = %self, status = %status, "Client error occurred");
        }

        self.to_problem().into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { .. } => ApiError::not_found(err.to_string()),
            CoreError::Conflict(message) => ApiError::conflict(message),
            CoreError::Validation(errors) => ApiError::Validation { errors },
            CoreError::Forbidden(message) => ApiError::forbidden(message),
            CoreError::InvalidCredentials => ApiError::Unauthorized {
                message: err.to_string(),
                code: Some("INVALID_CREDENTIALS"),
            },
            CoreError::Storage(_) | CoreError::Hashing(_) => ApiError::internal(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Invalid JSON: {}", err))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let cases = [
            (CoreError::not_found("Travel", 3), StatusCode::NOT_FOUND),
            (CoreError::conflict("dup"), StatusCode::CONFLICT),
            (CoreError::invalid_field("email", "bad"), StatusCode::BAD_REQUEST),
            (CoreError::forbidden("no"), StatusCode::FORBIDDEN),
            (CoreError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (CoreError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (core, status) in cases {
            assert_eq!(ApiError::from(core).status_code(), status);
        }
    }

    #[test]
    fn test_problem_shape() {
        let problem = ApiError::from(CoreError::invalid_field("email", "email is not valid"))
            .to_problem();
        let json = serde_json::to_value(&problem).unwrap();

        assert_eq!(json["status"], 400);
        assert_eq!(json["title"], "Bad Request");
        assert_eq!(json["validationErrors"][0]["field"], "email");
        assert!(json.get("timestamp").is_some());
        assert!(json.get("errorCode").is_none());
        assert!(json.get("path").is_none());
    }

    #[test]
    fn test_internal_detail_hidden() {
        let err = ApiError::internal("lock poisoned at memory.rs");
        assert_eq!(err.to_problem().detail, "An unexpected error occurred");
    }

    #[test]
    fn test_timeout_title() {
        let problem = Problem::new(StatusCode::REQUEST_TIMEOUT, "Request took too long");
        assert_eq!(problem.title, "Request Timeout");
        assert_eq!(problem.status, 408);
    }

    #[test]
    fn test_conflict_title() {
        let problem = ApiError::conflict("Username already in use").to_problem();
        assert_eq!(problem.title, "Conflict");
        assert_eq!(problem.status, 409);
    }
}
