// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API handlers for all endpoints.
//!
//! - [`health`]: liveness
//! - [`auth`]: login and self-registration
//! - [`employees`]: accounts, profile, avatar, role
//! - [`travels`]: travel catalogue
//! - [`bookings`]: booking creation and lookup

pub mod auth;
pub mod bookings;
pub mod employees;
pub mod health;
pub mod travels;
