// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `hash-password` command.

use waypoint_core::PasswordHasher;

use crate::cli::{Cli, HashPasswordArgs};
use crate::error::{BinError, BinResult};

/// Prints the bcrypt hash of a password.
pub async fn hash_password(_cli: &Cli, args: HashPasswordArgs) -> BinResult<()> {
    if args.password.is_empty() {
        return Err(BinError::runtime("Password cannot be empty"));
    }

    let hash = PasswordHasher::new(args.cost).hash(&args.password).await?;
    println!("{}", hash);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_rejects_empty_password() {
        let cli = Cli::parse_from(["waypoint"]);
        let args = HashPasswordArgs {
            password: String::new(),
            cost: 4,
        };
        assert!(hash_password(&cli, args).await.is_err());
    }

    #[tokio::test]
    async fn test_hashes_password() {
        let cli = Cli::parse_from(["waypoint"]);
        let args = HashPasswordArgs {
            password: "Password1".into(),
            cost: 4,
        };
        assert!(hash_password(&cli, args).await.is_ok());
    }
}
