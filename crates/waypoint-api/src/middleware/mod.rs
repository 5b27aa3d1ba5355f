// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Middleware implementations for the API server.
//!
//! - [`AuthMiddleware`]: authentication gate, outermost
//! - [`PolicyMiddleware`]: per-route authorization, after routing

mod auth;
mod policy;

pub use auth::{AuthLayer, AuthMiddleware};
pub use policy::{PolicyLayer, PolicyMiddleware};
