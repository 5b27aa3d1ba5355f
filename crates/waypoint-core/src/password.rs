// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Password hashing.
//!
//! bcrypt is CPU bound, so both hashing and verification run on the
//! blocking thread pool.

use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Default bcrypt cost.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Hashes and verifies passwords with a fixed bcrypt cost.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Creates a hasher with the given cost (4..=31).
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Returns the configured cost.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes a plain text password.
    pub async fn hash(&self, password: &str) -> CoreResult<String> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || {
            bcrypt::hash(password, cost).map_err(|e| CoreError::Hashing(e.to_string()))
        })
        .await
        .map_err(|e| CoreError::Hashing(format!("Task join error: {}", e)))?
    }

    /// Checks a plain text password against a stored hash.
    ///
    /// A malformed hash counts as a mismatch.
    pub async fn verify(&self, password: &str, hash: &str) -> CoreResult<bool> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
            .await
            .map_err(|e| CoreError::Hashing(format!("Task join error: {}", e)))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("cost", &self.cost)
            .finish()
    }
}
