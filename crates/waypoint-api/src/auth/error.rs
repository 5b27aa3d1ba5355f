// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication failures.

use thiserror::Error;

/// Why a request could not be authenticated.
///
/// The reason carried by [`AuthError::InvalidToken`] is for logs only; the
/// response detail is the same for every invalid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No bearer credential was presented.
    #[error("Authentication required")]
    MissingToken,

    /// A credential was presented but is not acceptable.
    #[error("Invalid or expired token")]
    InvalidToken(&'static str),
}

impl AuthError {
    /// Machine readable code sent in the problem body.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::InvalidToken(_) => "INVALID_TOKEN",
        }
    }

    /// Log-only reason.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "no bearer token",
            AuthError::InvalidToken(reason) => reason,
        }
    }
}
