// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `run` command.

use crate::cli::{Cli, RunArgs};
use crate::error::BinResult;
use crate::logging::init_logging;
use crate::runtime::RuntimeBuilder;

/// Executes the `run` command to start the server.
///
/// Logging is initialized after the configuration is loaded so the file's
/// level and format apply; command line flags still win.
pub async fn run(cli: &Cli, args: RunArgs) -> BinResult<()> {
    let runtime = RuntimeBuilder::new()
        .config_path(&cli.config)
        .seed(args.seed)
        .build()?;

    let logging = &runtime.config().logging;
    let level = cli.log_level_override().unwrap_or(logging.level.as_str());
    let format = cli.log_format.map(Into::into).unwrap_or(logging.format);
    init_logging(level, format);

    runtime.run().await
}
