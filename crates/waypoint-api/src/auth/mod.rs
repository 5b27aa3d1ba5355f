// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication and authorization module.
//!
//! This module provides:
//! - Token issuing and verification
//! - The per-request authentication context
//! - The per-route authorization policy

mod claims;
mod context;
mod error;
mod jwt;
pub mod policy;

pub use claims::{Claims, DisplayClaims};
pub use context::AuthContext;
pub use error::AuthError;
pub use jwt::{IssuedToken, TokenCodec, VerifiedToken};
pub use policy::{Access, Owner, PolicyTable, evaluate};
