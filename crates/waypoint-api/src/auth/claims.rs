// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Token claims.
//!
//! Claims carry the subject id and display data only. The role is never
//! embedded; it is read from the credential store on every request.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use waypoint_core::{Employee, EmployeeId};

/// Non-sensitive display data carried in a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayClaims {
    /// Login handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&Employee> for DisplayClaims {
    fn from(employee: &Employee) -> Self {
        Self {
            username: Some(employee.username.clone()),
            email: Some(employee.email.clone()),
        }
    }
}

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the employee id.
    pub sub: String,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issuer.
    pub iss: String,

    /// Token id.
    pub jti: String,

    /// Display data.
    #[serde(flatten)]
    pub display: DisplayClaims,
}

impl Claims {
    /// Creates claims issued at `issued_at` and valid for `lifetime`.
    pub fn new(
        subject: EmployeeId,
        display: DisplayClaims,
        issuer: &str,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: subject.to_string(),
            iat,
            exp: iat + lifetime.num_seconds(),
            iss: issuer.to_string(),
            jti: Uuid::now_v7().to_string(),
            display,
        }
    }

    /// Parses the subject as an employee id.
    pub fn subject(&self) -> Option<EmployeeId> {
        self.sub.parse().ok()
    }

    /// Returns `true` if the token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Returns the expiration time.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
