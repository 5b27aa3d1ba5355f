// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `run`: start the API server
//! - `validate`: validate the configuration file
//! - `hash-password`: print a bcrypt hash
//! - `version`: show version information

mod hash_password;
mod run;
mod validate;
mod version;

pub use hash_password::hash_password;
pub use run::run;
pub use validate::validate;
pub use version::version;

use crate::cli::{Cli, Commands};
use crate::error::BinResult;
use crate::logging::init_logging;

/// Executes the appropriate command based on CLI arguments.
pub async fn execute(cli: Cli) -> BinResult<()> {
    match cli.effective_command() {
        Commands::Run(args) => run::run(&cli, args).await,
        Commands::Validate(args) => {
            init_cli_logging(&cli);
            validate::validate(&cli, args)
        }
        Commands::HashPassword(args) => {
            init_cli_logging(&cli);
            hash_password::hash_password(&cli, args).await
        }
        Commands::Version => version::version(&cli),
    }
}

/// Logging for one-shot commands: problems only, unless flags say otherwise.
fn init_cli_logging(cli: &Cli) {
    let level = cli.log_level_override().unwrap_or("warn");
    init_logging(level, cli.log_format.map(Into::into).unwrap_or_default());
}
