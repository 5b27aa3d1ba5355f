// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use waypoint_config::WaypointConfig;
use waypoint_core::{
    BookingStore, EmployeeStore, PasswordHasher, Services, TravelStore,
};

use crate::auth::{PolicyTable, TokenCodec};
use crate::error::ApiResult;

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers.
///
/// Everything here is immutable after startup; the stores are the only
/// shared mutable resources and synchronize internally.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<WaypointConfig>,
    /// Domain services.
    pub services: Services,
    /// Token codec.
    pub codec: TokenCodec,
    /// Credential store consulted by the authentication gate.
    pub employees: Arc<dyn EmployeeStore>,
    /// Per-route authorization table.
    pub policy: Arc<PolicyTable>,
}

impl AppState {
    /// Wires services, codec and policy over one backing store.
    pub fn new<S>(config: Arc<WaypointConfig>, store: Arc<S>) -> ApiResult<Self>
    where
        S: EmployeeStore + TravelStore + BookingStore + 'static,
    {
        let codec = TokenCodec::from_config(&config.security.jwt)?;
        let hasher = PasswordHasher::new(config.security.bcrypt_cost);
        let services = Services::new(store.clone(), hasher);

        Ok(Self {
            config,
            services,
            codec,
            employees: store,
            policy: Arc::new(PolicyTable::standard()),
        })
    }

    /// Replaces the policy table.
    pub fn with_policy(mut self, policy: PolicyTable) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Returns the token codec.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("services", &self.services)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}
