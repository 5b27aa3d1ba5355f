// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Service runtime orchestration.
//!
//! Wires the in-memory store, domain services and HTTP server together,
//! optionally seeds demo data, and drives the server until a shutdown
//! signal arrives.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use waypoint_api::{ApiResult, ApiServer, AppState};
use waypoint_config::{ConfigLoader, WaypointConfig};
use waypoint_core::MemoryStore;
use waypoint_core::seed::{SeedOutcome, seed_demo_data};

use crate::error::{BinError, BinResult};
use crate::shutdown::ShutdownCoordinator;

// =============================================================================
// ServiceRuntime
// =============================================================================

/// The runtime that owns the server lifecycle.
pub struct ServiceRuntime {
    config: Arc<WaypointConfig>,
    shutdown: ShutdownCoordinator,
    seed: bool,
}

impl ServiceRuntime {
    /// Creates a new runtime.
    pub fn new(config: WaypointConfig) -> Self {
        Self {
            config: Arc::new(config),
            shutdown: ShutdownCoordinator::new(),
            seed: false,
        }
    }

    /// Forces demo seeding regardless of `seed.enabled`.
    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &WaypointConfig {
        &self.config
    }

    /// Returns the shutdown coordinator.
    pub fn shutdown(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }

    /// Builds the application state over a fresh in-memory store.
    pub async fn initialize(&self) -> BinResult<AppState> {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(self.config.clone(), store)
            .map_err(|e| BinError::init(format!("Failed to build application state: {}", e)))?;

        if self.seed || self.config.seed.enabled {
            match seed_demo_data(&state.services).await? {
                SeedOutcome::Seeded {
                    employees,
                    travels,
                    bookings,
                } => info!(employees, travels, bookings, "Seeded demo data"),
                SeedOutcome::Skipped => info!("Demo data already present"),
            }
        }

        Ok(state)
    }

    /// Runs the server until shutdown is signaled.
    pub async fn run(self) -> BinResult<()> {
        info!(version = waypoint_core::VERSION, "Starting Waypoint");

        let state = self.initialize().await?;
        let server = ApiServer::new(state);
        let addr = server.addr();
        let grace = self.config.server.shutdown_timeout();

        let signal = self.shutdown.shutdown_signal();
        let mut server_task: JoinHandle<ApiResult<()>> =
            tokio::spawn(server.run_with_shutdown(signal.wait()));

        info!(%addr, "Waypoint is ready");

        tokio::select! {
            joined = &mut server_task => {
                // Server ended without a signal, most likely a bind failure.
                return flatten(joined);
            }
            _ = self.shutdown.wait_for_shutdown() => {}
        }

        info!(grace_secs = grace.as_secs(), "Draining in-flight requests");
        let result = match tokio::time::timeout(grace, server_task).await {
            Ok(joined) => flatten(joined),
            Err(_) => {
                warn!("Graceful shutdown timed out, abandoning open connections");
                Ok(())
            }
        };

        info!("Waypoint shutdown complete");
        result
    }
}

fn flatten(joined: Result<ApiResult<()>, tokio::task::JoinError>) -> BinResult<()> {
    match joined {
        Ok(result) => result.map_err(BinError::from),
        Err(e) => Err(BinError::runtime(format!("Server task failed: {}", e))),
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for constructing the runtime.
pub struct RuntimeBuilder {
    config_path: Option<PathBuf>,
    config: Option<WaypointConfig>,
    seed: bool,
}

impl RuntimeBuilder {
    /// Creates a new runtime builder.
    pub fn new() -> Self {
        Self {
            config_path: None,
            config: None,
            seed: false,
        }
    }

    /// Sets the configuration file path.
    pub fn config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the configuration directly.
    pub fn config(mut self, config: WaypointConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Forces demo seeding.
    pub fn seed(mut self, enabled: bool) -> Self {
        self.seed = enabled;
        self
    }

    /// Builds the runtime.
    pub fn build(self) -> BinResult<ServiceRuntime> {
        let config = match self.config {
            Some(cfg) => cfg,
            None => {
                let path = self
                    .config_path
                    .ok_or_else(|| BinError::config("No configuration provided"))?;

                ConfigLoader::new()
                    .load(&path)
                    .map_err(|e| BinError::from(e).with_context(format!(
                        "Failed to load config from {}",
                        path.display()
                    )))?
            }
        };

        Ok(ServiceRuntime::new(config).with_seed(self.seed))
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
