// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Domain error type for Waypoint.
//!
//! Every store and service operation returns a [`CoreResult`]. The variants
//! form the failure taxonomy the HTTP layer translates into responses:
//!
//! ```text
//! CoreError
//! ├── NotFound            - referenced record does not exist        (404)
//! ├── Conflict            - uniqueness or referential rule violated (409)
//! ├── Validation          - field-level input errors                (400)
//! ├── Forbidden           - caller known but not permitted          (403)
//! ├── InvalidCredentials  - login rejected                          (401)
//! ├── Storage             - backing store failure                   (500)
//! └── Hashing             - password hashing failure                (500)
//! ```

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Result alias for domain operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Domain failure.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// A referenced record does not exist.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Kind of record.
        resource: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// A uniqueness or referential rule would be violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Input failed field-level validation.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The caller is known but not allowed to perform the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Email or password did not match.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Backing store failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Password hashing failure.
    #[error("Hashing error: {0}")]
    Hashing(String),
}

impl CoreError {
    /// Creates a not found error.
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates a single-field validation error.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        Self::Validation(errors)
    }

    /// Returns the error kind as a string for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => "not_found",
            CoreError::Conflict(_) => "conflict",
            CoreError::Validation(_) => "validation",
            CoreError::Forbidden(_) => "forbidden",
            CoreError::InvalidCredentials => "invalid_credentials",
            CoreError::Storage(_) => "storage",
            CoreError::Hashing(_) => "hashing",
        }
    }

    /// Returns `true` for failures caused by the server rather than the caller.
    pub fn is_internal(&self) -> bool {
        matches!(self, CoreError::Storage(_) | CoreError::Hashing(_))
    }
}

// =============================================================================
// Tests
// =============================================================================
