// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication context.

use std::net::IpAddr;

use uuid::Uuid;

use waypoint_core::{Employee, EmployeeId, Principal, Role};

/// Per-request identity attached by the authentication gate.
///
/// The principal's role is the one stored for the employee at the moment the
/// request was authenticated, never a value read from the token.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Resolved caller identity.
    pub principal: Principal,
    /// Caller's username, for logs.
    pub username: String,
    /// Request ID for tracing.
    pub request_id: Uuid,
    /// Client IP address.
    pub client_ip: Option<IpAddr>,
}

impl AuthContext {
    /// Creates a context for a freshly resolved employee.
    pub fn for_employee(employee: &Employee) -> Self {
        Self {
            principal: Principal::from(employee),
            username: employee.username.clone(),
            request_id: Uuid::now_v7(),
            client_ip: None,
        }
    }

    /// Sets the client IP address.
    pub fn with_client_ip(mut self, ip: Option<IpAddr>) -> Self {
        self.client_ip = ip;
        self
    }

    /// Sets the request ID.
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Caller's employee id.
    pub fn employee_id(&self) -> EmployeeId {
        self.principal.id
    }

    /// Caller's role.
    pub fn role(&self) -> Role {
        self.principal.role
    }

    /// Returns `true` if the caller is an administrator.
    pub fn is_admin(&self) -> bool {
        self.principal.is_admin()
    }
}
