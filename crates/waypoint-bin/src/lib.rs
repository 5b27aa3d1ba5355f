// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # waypoint-bin
//!
//! Command line entry point for the Waypoint travel booking service.
//!
//! - CLI argument parsing with clap
//! - Runtime orchestration (store, services, HTTP server)
//! - Graceful shutdown handling
//! - Logging initialization
//!
//! ## Usage
//!
//! ```bash
//! # Start the server (default command)
//! waypoint
//!
//! # Start with a custom config and demo data
//! waypoint -c /etc/waypoint/config.yaml run --seed
//!
//! # Validate configuration
//! waypoint validate --show-config
//!
//! # Hash a password for manual inserts
//! waypoint hash-password 'Secret1'
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod shutdown;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;
pub use runtime::{RuntimeBuilder, ServiceRuntime};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
