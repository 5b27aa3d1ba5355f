// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Route patterns shared by the router and the policy table.

#![allow(missing_docs)]

pub const HEALTH: &str = "/health";

pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";

pub const EMPLOYEES: &str = "/api/employees";
pub const EMPLOYEE_ME: &str = "/api/employees/me";
pub const EMPLOYEE_ME_AVATAR: &str = "/api/employees/me/avatar";
pub const EMPLOYEE: &str = "/api/employees/{id}";
pub const EMPLOYEE_AVATAR: &str = "/api/employees/{id}/avatar";
pub const EMPLOYEE_ROLE: &str = "/api/employees/{id}/role";
pub const EMPLOYEE_BOOKINGS: &str = "/api/employees/{id}/bookings";

pub const TRAVELS: &str = "/api/travels";
pub const TRAVEL: &str = "/api/travels/{id}";
pub const TRAVEL_STATUS: &str = "/api/travels/{id}/status";

pub const BOOKINGS: &str = "/api/bookings";
pub const BOOKINGS_ME: &str = "/api/bookings/me";
pub const BOOKING: &str = "/api/bookings/{id}";

/// Path parameter naming the owning employee in owner-scoped routes.
pub const OWNER_PARAM: &str = "id";
