// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # waypoint-config
//!
//! Configuration management for the Waypoint travel booking service.
//!
//! ## Features
//!
//! - **Schema Definition**: typed configuration with defaults and validation
//! - **Multi-Format Support**: YAML, TOML and JSON configuration files
//! - **Environment Placeholders**: `${VAR}` and `${VAR:default}` in file content
//! - **Environment Overrides**: `WAYPOINT_*` variables override selected keys
//! - **Secret Redaction**: the signing secret never prints or serializes
//!
//! ## Quick Start
//!
//! ```no_run
//! use waypoint_config::load_config;
//!
//! let config = load_config("waypoint.yaml").unwrap();
//! println!("Listening on {}", config.server.socket_addr());
//! ```
//!
//! ## Configuration Schema
//!
//! - `server` - bind address, timeouts, CORS origins
//! - `security` - token secret, issuer and lifetime, public paths, bcrypt cost
//! - `logging` - level and format
//! - `seed` - demo data toggle

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader, load_config, load_config_str};
pub use schema::{
    JwtConfig, LogFormat, LogLevel, LoggingConfig, SecretValue, SecurityConfig, SeedConfig,
    ServerConfig, WaypointConfig,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
