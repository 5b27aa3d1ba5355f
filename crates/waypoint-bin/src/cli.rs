// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! - `run`: start the API server (default)
//! - `validate`: validate the configuration file
//! - `hash-password`: print a bcrypt hash for seeding or manual inserts
//! - `version`: show version information

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Waypoint - corporate travel booking service
#[derive(Parser, Debug)]
#[command(
    name = "waypoint",
    author = "Sylvex <contact@sylvex.io>",
    version = waypoint_core::VERSION,
    about = "Corporate travel booking service",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "waypoint.yaml",
        env = "WAYPOINT_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Log format; overrides the config file
    #[arg(long, env = "WAYPOINT_LOG_FORMAT", global = true)]
    pub log_format: Option<LogFormat>,

    /// Enable quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the API server
    ///
    /// This is the default command when no subcommand is specified.
    Run(RunArgs),

    /// Validate the configuration file
    ///
    /// Parses and validates the configuration file without starting the server.
    Validate(ValidateArgs),

    /// Print a bcrypt hash of a password
    #[command(name = "hash-password")]
    HashPassword(HashPasswordArgs),

    /// Show detailed version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `run` command.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Seed demo data into an empty store, whatever the config says
    #[arg(long)]
    pub seed: bool,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Show parsed configuration after validation (secret redacted)
    #[arg(short, long)]
    pub show_config: bool,

    /// Output format for validation results
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `hash-password` command.
#[derive(Args, Debug, Clone)]
pub struct HashPasswordArgs {
    /// Password to hash
    pub password: String,

    /// bcrypt cost (4 to 31)
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(4..=31))]
    pub cost: u32,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic parsing
    Json,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective command, defaulting to `Run` if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }

    /// Check if verbose logging is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Log level forced by flags, if any.
    pub fn log_level_override(&self) -> Option<&str> {
        if self.quiet {
            Some("warn")
        } else if self.verbose {
            Some("debug")
        } else {
            self.log_level.as_deref()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["waypoint"]);
        assert!(cli.command.is_none());
        assert!(matches!(cli.effective_command(), Commands::Run(ref args) if !args.seed));
    }

    #[test]
    fn test_run_command() {
        let cli = Cli::parse_from(["waypoint", "run", "--seed"]);
        assert!(matches!(cli.command, Some(Commands::Run(RunArgs { seed: true }))));
    }

    #[test]
    fn test_validate_command() {
        let cli = Cli::parse_from(["waypoint", "validate", "--show-config", "-f", "json"]);
        if let Some(Commands::Validate(args)) = cli.command {
            assert!(args.show_config);
            assert_eq!(args.format, OutputFormat::Json);
        } else {
            panic!("Expected Validate command");
        }
    }

    #[test]
    fn test_config_path() {
        let cli = Cli::parse_from(["waypoint", "-c", "/etc/waypoint/config.yaml"]);
        assert_eq!(cli.config, PathBuf::from("/etc/waypoint/config.yaml"));
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::parse_from(["waypoint", "-l", "debug"]);
        assert_eq!(cli.log_level_override(), Some("debug"));

        let cli = Cli::parse_from(["waypoint"]);
        assert_eq!(cli.log_level_override(), None);
    }

    #[test]
    fn test_quiet_mode() {
        let cli = Cli::parse_from(["waypoint", "-q"]);
        assert!(cli.quiet);
        assert_eq!(cli.log_level_override(), Some("warn"));
    }

    #[test]
    fn test_verbose_mode() {
        let cli = Cli::parse_from(["waypoint", "-v"]);
        assert!(cli.is_verbose());
        assert_eq!(cli.log_level_override(), Some("debug"));
    }

    #[test]
    fn test_hash_password_command() {
        let cli = Cli::parse_from(["waypoint", "hash-password", "Secret1", "--cost", "4"]);
        if let Some(Commands::HashPassword(args)) = cli.command {
            assert_eq!(args.password, "Secret1");
            assert_eq!(args.cost, 4);
        } else {
            panic!("Expected HashPassword command");
        }

        assert!(Cli::try_parse_from(["waypoint", "hash-password", "x", "--cost", "40"]).is_err());
    }
}
