// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-route authorization policy.
//!
//! Every route declares one [`Access`] mode in a [`PolicyTable`]. A single
//! evaluator, [`evaluate`], decides each request from the mode, the resolved
//! principal and, for owner-scoped routes, the resource owner id.
//!
//! "Me" routes are plain [`Access::Authenticated`]: their handlers take the
//! owner id from the principal, so there is no id to substitute.

use std::collections::HashMap;

use axum::http::Method;

use waypoint_core::{EmployeeId, Principal};

use crate::error::ApiError;
use crate::routes;

// =============================================================================
// Access
// =============================================================================

/// Where an owner-scoped route finds its owner id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// A path parameter holding the owning employee id.
    Path(&'static str),
    /// The loaded resource; the handler evaluates after the lookup.
    Resource,
}

/// Authorization mode declared per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No principal required.
    Open,
    /// Any resolved principal.
    Authenticated,
    /// Administrators only.
    AdminOnly,
    /// Administrators, or the principal that owns the resource.
    AdminOrOwner(Owner),
}

impl Access {
    /// Returns `true` if a principal must be present.
    pub fn requires_principal(&self) -> bool {
        !matches!(self, Access::Open)
    }
}

/// Decides a request.
///
/// A missing principal on a protected route is `Unauthorized`; a known
/// principal without the required role or ownership is `Forbidden`.
pub fn evaluate(
    access: Access,
    principal: Option<&Principal>,
    owner: Option<EmployeeId>,
) -> Result<(), ApiError> {
    if access == Access::Open {
        return Ok(());
    }

    let Some(principal) = principal else {
        return Err(ApiError::unauthorized("Authentication required"));
    };

    let allowed = match access {
        Access::Open | Access::Authenticated => true,
        Access::AdminOnly => principal.is_admin(),
        Access::AdminOrOwner(_) => {
            principal.is_admin() || owner.is_some_and(|owner| principal.is(owner))
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(ApiError::forbidden("Access denied"))
    }
}

// =============================================================================
// PolicyTable
// =============================================================================

/// Route-to-mode table.
///
/// Routes missing from the table are treated as [`Access::AdminOnly`].
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    rules: HashMap<Method, HashMap<&'static str, Access>>,
}

impl PolicyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a rule.
    pub fn with_rule(mut self, method: Method, route: &'static str, access: Access) -> Self {
        self.rules.entry(method).or_default().insert(route, access);
        self
    }

    /// The service's route table.
    pub fn standard() -> Self {
        use Access::*;

        let own_path = AdminOrOwner(Owner::Path(routes::OWNER_PARAM));

        Self::new()
            .with_rule(Method::GET, routes::HEALTH, Open)
            .with_rule(Method::POST, routes::LOGIN, Open)
            .with_rule(Method::POST, routes::REGISTER, Open)
            // employees
            .with_rule(Method::GET, routes::EMPLOYEES, AdminOnly)
            .with_rule(Method::POST, routes::EMPLOYEES, AdminOnly)
            .with_rule(Method::GET, routes::EMPLOYEE_ME, Authenticated)
            .with_rule(Method::PUT, routes::EMPLOYEE_ME, Authenticated)
            .with_rule(Method::PUT, routes::EMPLOYEE_ME_AVATAR, Authenticated)
            .with_rule(Method::GET, routes::EMPLOYEE, own_path)
            .with_rule(Method::PUT, routes::EMPLOYEE, AdminOnly)
            .with_rule(Method::DELETE, routes::EMPLOYEE, AdminOnly)
            .with_rule(Method::PUT, routes::EMPLOYEE_AVATAR, AdminOnly)
            .with_rule(Method::PUT, routes::EMPLOYEE_ROLE, AdminOnly)
            .with_rule(Method::GET, routes::EMPLOYEE_BOOKINGS, own_path)
            // travels
            .with_rule(Method::GET, routes::TRAVELS, Authenticated)
            .with_rule(Method::POST, routes::TRAVELS, AdminOnly)
            .with_rule(Method::GET, routes::TRAVEL, Authenticated)
            .with_rule(Method::PUT, routes::TRAVEL, AdminOnly)
            .with_rule(Method::DELETE, routes::TRAVEL, AdminOnly)
            .with_rule(Method::PATCH, routes::TRAVEL_STATUS, AdminOnly)
            // bookings
            .with_rule(Method::GET, routes::BOOKINGS, AdminOnly)
            .with_rule(Method::POST, routes::BOOKINGS, Authenticated)
            .with_rule(Method::GET, routes::BOOKINGS_ME, Authenticated)
            .with_rule(Method::GET, routes::BOOKING, AdminOrOwner(Owner::Resource))
    }

    /// Mode for a matched route.
    pub fn access_for(&self, method: &Method, route: &str) -> Access {
        self.rules
            .get(method)
            .and_then(|routes| routes.get(route))
            .copied()
            .unwrap_or(Access::AdminOnly)
    }

    /// Number of declared rules.
    pub fn len(&self) -> usize {
        self.rules.values().map(HashMap::len).sum()
    }

    /// Returns `true` if no rule is declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Tests
// =============================================================================
