// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loader.
//!
//! Loading runs in a fixed order:
//!
//! 1. read the file and pick the format from its extension
//! 2. replace `${VAR}` / `${VAR:default}` placeholders in the raw text
//! 3. deserialize
//! 4. apply `WAYPOINT_*` environment overrides
//! 5. validate
//!
//! Overrides recognised with the default prefix:
//!
//! | Variable | Field |
//! |---|---|
//! | `WAYPOINT_SERVER_HOST` | `server.host` |
//! | `WAYPOINT_SERVER_PORT` | `server.port` |
//! | `WAYPOINT_JWT_SECRET` | `security.jwt.secret` |
//! | `WAYPOINT_JWT_LIFETIME_SECS` | `security.jwt.lifetime_secs` |
//! | `WAYPOINT_LOG_LEVEL` | `logging.level` |
//! | `WAYPOINT_SEED_ENABLED` | `seed.enabled` |

use std::env;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{LogLevel, SecretValue, WaypointConfig};

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "WAYPOINT";

// =============================================================================
// ConfigFormat
// =============================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML (`.yaml`, `.yml`).
    Yaml,
    /// TOML (`.toml`).
    Toml,
    /// JSON (`.json`).
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::unsupported_format(extension)),
        }
    }
}

// =============================================================================
// ConfigLoader
// =============================================================================

/// Configuration loader for Waypoint.
///
/// # Examples
///
/// ```no_run
/// use waypoint_config::loader::ConfigLoader;
///
/// let config = ConfigLoader::new().load("waypoint.yaml").unwrap();
/// println!("listening on {}", config.server.socket_addr());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Environment variable prefix.
    env_prefix: String,

    /// Whether to read placeholders and overrides from the environment.
    resolve_env_vars: bool,
}

impl ConfigLoader {
    /// Creates a new configuration loader with default settings.
    pub fn new() -> Self {
        Self {
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            resolve_env_vars: true,
        }
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Enables or disables environment variable resolution.
    pub fn with_env_vars(mut self, enabled: bool) -> Self {
        self.resolve_env_vars = enabled;
        self
    }

    /// Loads and validates configuration from a file.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<WaypointConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let format = ConfigFormat::from_path(path)?;

        let mut config = self
            .parse(&content, format)
            .map_err(|e| match e {
                ConfigError::Serialization { message } => ConfigError::parse(path, message),
                other => other,
            })?;

        self.finish(&mut config)?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Loads and validates configuration from a string.
    pub fn load_from_str(&self, content: &str, format: ConfigFormat) -> ConfigResult<WaypointConfig> {
        let mut config = self.parse(content, format)?;
        self.finish(&mut config)?;
        Ok(config)
    }

    fn parse(&self, content: &str, format: ConfigFormat) -> ConfigResult<WaypointConfig> {
        let content = if self.resolve_env_vars {
            resolve_placeholders(content, |name| env::var(name).ok())
        } else {
            content.to_string()
        };
        parse_str(&content, format)
    }

    fn finish(&self, config: &mut WaypointConfig) -> ConfigResult<()> {
        if self.resolve_env_vars {
            self.apply_overrides(config, |name| env::var(name).ok())?;
        }
        config.validate()?;
        debug!(
            addr = %config.server.socket_addr(),
            public_paths = config.security.public_paths.len(),
            seed = config.seed.enabled,
            "Configuration validated"
        );
        Ok(())
    }

    /// Applies `{prefix}_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&self, config: &mut WaypointConfig, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| format!("{}_{}", self.env_prefix, suffix);

        if let Some(value) = lookup(&var("SERVER_HOST")) {
            config.server.host = value.parse().map_err(|_| {
                ConfigError::invalid_env_var(var("SERVER_HOST"), "expected an IP address")
            })?;
        }
        if let Some(value) = lookup(&var("SERVER_PORT")) {
            config.server.port = value.parse().map_err(|_| {
                ConfigError::invalid_env_var(var("SERVER_PORT"), "expected valid port number")
            })?;
        }
        if let Some(value) = lookup(&var("JWT_SECRET")) {
            config.security.jwt.secret = Some(SecretValue::new(value));
        }
        if let Some(value) = lookup(&var("JWT_LIFETIME_SECS")) {
            config.security.jwt.lifetime_secs = value.parse().map_err(|_| {
                ConfigError::invalid_env_var(var("JWT_LIFETIME_SECS"), "expected valid number")
            })?;
        }
        if let Some(value) = lookup(&var("LOG_LEVEL")) {
            match LogLevel::parse(&value) {
                Some(level) => config.logging.level = level,
                None => warn!("Ignoring unknown log level in {}", var("LOG_LEVEL")),
            }
        }
        if let Some(value) = lookup(&var("SEED_ENABLED")) {
            config.seed.enabled = parse_bool(&value);
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Replaces `${VAR}` and `${VAR:default}` placeholders.
///
/// Unknown variables without a default, and unterminated placeholders, are
/// left untouched.
fn resolve_placeholders<F>(content: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find('}') else {
            result.push_str(&rest[start..]);
            return result;
        };

        let inner = &after[..end];
        let (name, default) = match inner.split_once(':') {
            Some((name, default)) => (name, Some(default)),
            None => (inner, None),
        };

        match (lookup(name), default) {
            (Some(value), _) => result.push_str(&value),
            (None, Some(default)) => result.push_str(default),
            (None, None) => {
                warn!("Environment variable '{}' not found", name);
                result.push_str(&rest[start..start + 2 + end + 1]);
            }
        }
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}

fn parse_str<T: DeserializeOwned>(content: &str, format: ConfigFormat) -> ConfigResult<T> {
    match format {
        ConfigFormat::Yaml => parse_yaml(content),
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
    }
}

/// YAML goes through the `config` crate.
fn parse_yaml<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
    config::Config::builder()
        .add_source(config::File::from_str(content, config::FileFormat::Yaml))
        .build()
        .and_then(|c| c.try_deserialize())
        .map_err(|e| ConfigError::serialization(e.to_string()))
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

// =============================================================================
// Convenience Functions
// =============================================================================

/// Loads configuration from a file with default settings.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<WaypointConfig> {
    ConfigLoader::new().load(path)
}

/// Loads configuration from a string with default settings.
pub fn load_config_str(content: &str, format: ConfigFormat) -> ConfigResult<WaypointConfig> {
    ConfigLoader::new().load_from_str(content, format)
}

// =============================================================================
// Tests
// =============================================================================
