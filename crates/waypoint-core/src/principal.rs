// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The authenticated identity attached to a request.

use crate::types::{Employee, EmployeeId, Role};

/// An authenticated caller.
///
/// Built per request from the verified token subject and the role currently
/// stored for that employee. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// Employee id taken from the token subject.
    pub id: EmployeeId,
    /// Role as stored at resolution time.
    pub role: Role,
}

impl Principal {
    /// Creates a principal.
    pub fn new(id: EmployeeId, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns `true` if the principal is an administrator.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns `true` if the principal is `owner`.
    #[inline]
    pub fn is(&self, owner: EmployeeId) -> bool {
        self.id == owner
    }

    /// Returns `true` if the principal is an administrator or `owner`.
    #[inline]
    pub fn is_admin_or(&self, owner: EmployeeId) -> bool {
        self.is_admin() || self.is(owner)
    }
}

impl From<&Employee> for Principal {
    fn from(employee: &Employee) -> Self {
        Self::new(employee.id, employee.role)
    }
}
