// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use waypoint_config::schema::RECOMMENDED_SECRET_LEN;
use waypoint_config::{ConfigLoader, WaypointConfig};

use crate::cli::{Cli, OutputFormat, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Executes the `validate` command to validate configuration.
pub fn validate(cli: &Cli, args: ValidateArgs) -> BinResult<()> {
    let config_path = &cli.config;

    let config = ConfigLoader::new().load(config_path).map_err(|e| {
        BinError::from(e).with_context("Configuration validation failed")
    })?;

    let warnings = collect_warnings(&config);

    match args.format {
        OutputFormat::Text => {
            println!("✓ Configuration is valid: {}", config_path.display());
            println!();
            println!("Summary:");
            println!("  Listen:        {}", config.server.socket_addr());
            println!("  Token issuer:  {}", config.security.jwt.issuer);
            println!("  Token life:    {}s", config.security.jwt.lifetime_secs);
            println!("  bcrypt cost:   {}", config.security.bcrypt_cost);
            println!("  Public paths:  {}", config.security.public_paths.join(", "));
            println!("  Seed:          {}", if config.seed.enabled { "enabled" } else { "disabled" });

            if !warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in &warnings {
                    println!("  ⚠ {}", warning);
                }
            }

            if args.show_config {
                println!();
                println!("Parsed configuration:");
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "valid": true,
                "config_path": config_path.display().to_string(),
                "summary": {
                    "listen": config.server.socket_addr().to_string(),
                    "token_issuer": config.security.jwt.issuer,
                    "token_lifetime_secs": config.security.jwt.lifetime_secs,
                    "bcrypt_cost": config.security.bcrypt_cost,
                    "public_paths": config.security.public_paths,
                    "seed_enabled": config.seed.enabled,
                },
                "warnings": warnings,
                "config": if args.show_config { Some(&config) } else { None },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Non-fatal findings worth surfacing before deployment.
fn collect_warnings(config: &WaypointConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(secret) = &config.security.jwt.secret {
        if secret.expose().len() < RECOMMENDED_SECRET_LEN {
            warnings.push(format!(
                "Token secret is shorter than {} bytes",
                RECOMMENDED_SECRET_LEN
            ));
        }
    }
    if config.server.cors_origins.iter().any(|origin| origin == "*") {
        warnings.push("CORS allows any origin".to_string());
    }
    if config.security.bcrypt_cost < 10 {
        warnings.push(format!(
            "bcrypt cost {} is below 10",
            config.security.bcrypt_cost
        ));
    }
    if config.seed.enabled {
        warnings.push("Demo data seeding is enabled".to_string());
    }

    warnings
}
