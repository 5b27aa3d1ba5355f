// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Field-level input validation.
//!
//! Validators collect every failing field into a [`ValidationErrors`]
//! instead of stopping at the first one, so a client can fix a whole form
//! in a single round trip.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// ValidationErrors
// =============================================================================

/// A collection of field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    /// Individual field errors, in the order they were found.
    pub fields: Vec<FieldError>,
}

/// A single field error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as seen by the client.
    pub field: String,
    /// Error message.
    pub message: String,
}

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Returns `true` if no error was recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of recorded errors.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `Ok(())` when empty, otherwise [`CoreError::Validation`].
    pub fn into_result(self) -> CoreResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }

    /// Checks that `value`, trimmed, has between `min` and `max` characters.
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.trim().chars().count();
        if len == 0 {
            self.add(field, format!("{} is required", field));
        } else if len < min || len > max {
            self.add(
                field,
                format!("{} must be between {} and {} characters", field, min, max),
            );
        }
    }

    /// Checks that an optional `value` has at most `max` characters.
    pub fn max_length(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            if value.chars().count() > max {
                self.add(field, format!("{} must be at most {} characters", field, max));
            }
        }
    }

    /// Checks that `value` looks like an email address.
    pub fn email(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", field));
        } else if !is_valid_email(value) {
            self.add(field, "email is not valid");
        }
    }

    /// Checks the password policy: at least 4 characters containing a
    /// digit, a lowercase letter and an uppercase letter.
    pub fn password(&mut self, field: &str, value: &str) {
        if value.chars().count() < 4 {
            self.add(field, "password must be at least 4 characters");
            return;
        }
        let has_digit = value.chars().any(|c| c.is_ascii_digit());
        let has_lower = value.chars().any(|c| c.is_lowercase());
        let has_upper = value.chars().any(|c| c.is_uppercase());
        if !(has_digit && has_lower && has_upper) {
            self.add(
                field,
                "password must contain a digit, a lowercase and an uppercase letter",
            );
        }
    }

    /// Checks that `value` is an absolute http(s) URL.
    pub fn http_url(&mut self, field: &str, value: &str) {
        let rest = value
            .strip_prefix("https://")
            .or_else(|| value.strip_prefix("http://"));
        match rest {
            Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => {}
            _ => self.add(field, format!("{} must be an http(s) URL", field)),
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(head, tail)| !head.is_empty() && !tail.is_empty() && !tail.ends_with('.'))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_errors() {
        let mut errors = ValidationErrors::new();
        errors.length("username", "ab", 3, 30);
        errors.email("email", "not-an-email");
        errors.password("password", "password");
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors.into_result(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_length_required() {
        let mut errors = ValidationErrors::new();
        errors.length("name", "   ", 2, 40);
        assert_eq!(errors.fields[0].message, "name is required");
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("mario.rossi@example.com"));
        assert!(!is_valid_email("mario@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("mario@example"));
        assert!(!is_valid_email("mario rossi@example.com"));
    }

    #[test]
    fn test_password_policy() {
        let mut errors = ValidationErrors::new();
        errors.password("password", "Password1");
        assert!(errors.is_empty());

        errors.password("password", "Pa1");
        errors.password("password", "PASSWORD1");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_http_url() {
        let mut errors = ValidationErrors::new();
        errors.http_url("avatarUrl", "https://cdn.example.com/a.png");
        assert!(errors.is_empty());
        errors.http_url("avatarUrl", "ftp://example.com/a.png");
        errors.http_url("avatarUrl", "https://");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_max_length() {
        let mut errors = ValidationErrors::new();
        errors.max_length("notes", Some(&"x".repeat(500)), 500);
        errors.max_length("notes", None, 500);
        assert!(errors.is_empty());
        errors.max_length("notes", Some(&"x".repeat(501)), 500);
        assert_eq!(errors.len(), 1);
    }
}
