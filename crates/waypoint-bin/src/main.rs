// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Waypoint - corporate travel booking service.
//!
//! Main binary entry point.

use waypoint_bin::Cli;
use waypoint_bin::commands::execute;
use waypoint_bin::error::report_error_and_exit;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = execute(cli).await {
        report_error_and_exit(e);
    }
}
