// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema for Waypoint.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//!   cors_origins: ["http://localhost:5173"]
//! security:
//!   jwt:
//!     secret: ${WAYPOINT_JWT_SECRET}
//!     lifetime_secs: 3600
//!   public_paths: ["/auth/", "/health"]
//!   bcrypt_cost: 12
//! logging:
//!   level: info
//!   format: text
//! seed:
//!   enabled: false
//! ```

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Constants
// =============================================================================

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default token lifetime in seconds (1 hour).
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// Longest accepted token lifetime in seconds (30 days).
pub const MAX_TOKEN_LIFETIME_SECS: u64 = 30 * 24 * 3600;

/// Largest accepted clock leeway in seconds.
pub const MAX_TOKEN_LEEWAY_SECS: u64 = 300;

/// Default bcrypt cost.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Secrets shorter than this are accepted with a warning.
pub const RECOMMENDED_SECRET_LEN: usize = 32;

// =============================================================================
// Top-Level Configuration
// =============================================================================

/// The root configuration structure for Waypoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaypointConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Token and access settings.
    #[serde(default)]
    pub security: SecurityConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Demo data settings.
    #[serde(default)]
    pub seed: SeedConfig,
}

impl WaypointConfig {
    /// Validates the entire configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.security.validate()?;
        Ok(())
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Grace period for in-flight requests on shutdown, in seconds.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,

    /// Allowed CORS origins. `*` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_request_timeout() -> u64 {
    30
}

fn default_shutdown_timeout() -> u64 {
    10
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

impl ServerConfig {
    /// Validates the server configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout_secs",
                "cannot be zero",
            ));
        }
        Ok(())
    }

    /// Returns the socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the shutdown grace period as a Duration.
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            request_timeout_secs: default_request_timeout(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            cors_origins: default_cors_origins(),
        }
    }
}

// =============================================================================
// Security Configuration
// =============================================================================

/// Token signing and access configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecurityConfig {
    /// Token settings.
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Path prefixes that skip authentication.
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,

    /// bcrypt cost for new password hashes.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_public_paths() -> Vec<String> {
    vec!["/auth/".to_string(), "/health".to_string()]
}

fn default_bcrypt_cost() -> u32 {
    DEFAULT_BCRYPT_COST
}

impl SecurityConfig {
    /// Validates the security configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.jwt.validate()?;

        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::validation(
                "security.bcrypt_cost",
                "must be between 4 and 31",
            ));
        }
        if let Some(path) = self.public_paths.iter().find(|p| !p.starts_with('/')) {
            return Err(ConfigError::validation(
                "security.public_paths",
                format!("'{}' must start with '/'", path),
            ));
        }
        Ok(())
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            public_paths: default_public_paths(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

/// Token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JwtConfig {
    /// HMAC signing secret. Required.
    #[serde(default)]
    pub secret: Option<SecretValue>,

    /// Token issuer.
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Token lifetime in seconds.
    #[serde(default = "default_lifetime")]
    pub lifetime_secs: u64,

    /// Clock skew tolerated when checking expiry, in seconds.
    #[serde(default)]
    pub leeway_secs: u64,
}

fn default_issuer() -> String {
    "waypoint".to_string()
}

fn default_lifetime() -> u64 {
    DEFAULT_TOKEN_LIFETIME_SECS
}

impl JwtConfig {
    /// Validates the token configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        match self.secret {
            None => {
                return Err(ConfigError::validation(
                    "security.jwt.secret",
                    "secret is required",
                ));
            }
            Some(ref secret) if secret.expose().trim().is_empty() => {
                return Err(ConfigError::validation(
                    "security.jwt.secret",
                    "secret cannot be empty",
                ));
            }
            Some(ref secret) if secret.expose().len() < RECOMMENDED_SECRET_LEN => {
                tracing::warn!(
                    "security.jwt.secret is shorter than {} bytes",
                    RECOMMENDED_SECRET_LEN
                );
            }
            Some(_) => {}
        }
        if self.lifetime_secs == 0 {
            return Err(ConfigError::validation(
                "security.jwt.lifetime_secs",
                "cannot be zero",
            ));
        }
        if self.lifetime_secs > MAX_TOKEN_LIFETIME_SECS {
            return Err(ConfigError::validation(
                "security.jwt.lifetime_secs",
                format!("cannot exceed {} seconds", MAX_TOKEN_LIFETIME_SECS),
            ));
        }
        if self.leeway_secs > MAX_TOKEN_LEEWAY_SECS {
            return Err(ConfigError::validation(
                "security.jwt.leeway_secs",
                format!("cannot exceed {} seconds", MAX_TOKEN_LEEWAY_SECS),
            ));
        }
        if self.issuer.trim().is_empty() {
            return Err(ConfigError::validation(
                "security.jwt.issuer",
                "cannot be empty",
            ));
        }
        Ok(())
    }

    /// Returns the token lifetime as a Duration.
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.lifetime_secs)
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            issuer: default_issuer(),
            lifetime_secs: DEFAULT_TOKEN_LIFETIME_SECS,
            leeway_secs: 0,
        }
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Returns the filter directive for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parses a level name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable text.
    #[default]
    Text,
    /// Compact single-line text.
    Compact,
    /// JSON for log collectors.
    Json,
}

// =============================================================================
// Seed Configuration
// =============================================================================

/// Demo data configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    /// Seed demo data into an empty store at startup.
    #[serde(default)]
    pub enabled: bool,
}

// =============================================================================
// Secret Value
// =============================================================================

/// A secret string that never prints or serializes its content.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SecretValue(String);

impl SecretValue {
    /// Creates a new secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret itself. Keep the result out of logs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretValue(***)")
    }
}

impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("***")
    }
}

// =============================================================================
// Tests
// =============================================================================
