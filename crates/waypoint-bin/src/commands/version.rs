// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

use crate::cli::Cli;
use crate::error::BinResult;

/// Executes the `version` command to display version information.
pub fn version(_cli: &Cli) -> BinResult<()> {
    println!("Waypoint - corporate travel booking service");
    println!();
    println!("Version Information:");
    println!("  waypoint-bin:    {}", env!("CARGO_PKG_VERSION"));
    println!("  waypoint-core:   {}", waypoint_core::VERSION);
    println!("  waypoint-api:    {}", waypoint_api::VERSION);
    println!("  waypoint-config: {}", waypoint_config::VERSION);
    println!();
    println!("Build Information:");
    println!("  Rust Edition: 2024");
    println!("  Target:       {}", std::env::consts::ARCH);
    println!("  OS:           {}", std::env::consts::OS);
    println!();
    println!("License: PolyForm Noncommercial License 1.0.0");
    println!("Copyright (c) 2025 Sylvex. All rights reserved.");

    Ok(())
}
