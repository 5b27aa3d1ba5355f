// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # waypoint-api
//!
//! HTTP API for the Waypoint travel booking service.
//!
//! ## Request pipeline
//!
//! ```text
//! request -> AuthLayer (gate) -> router -> PolicyLayer -> handler -> services
//!               |                             |
//!               401 Problem                   401/403 Problem
//! ```
//!
//! - [`auth::TokenCodec`] issues and verifies HS256 bearer tokens. Tokens
//!   carry the employee id and display claims, never the role.
//! - [`middleware::AuthLayer`] resolves the token subject against the
//!   credential store on every request and attaches an [`auth::AuthContext`].
//! - [`auth::PolicyTable`] declares one [`auth::Access`] mode per route;
//!   [`auth::evaluate`] is the only place access is decided.
//! - [`error::ApiError`] translates domain failures into problem responses.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use auth::{Access, AuthContext, AuthError, Owner, PolicyTable, TokenCodec};
pub use error::{ApiError, ApiResult, Problem};
pub use server::{ApiServer, router};
pub use state::AppState;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
