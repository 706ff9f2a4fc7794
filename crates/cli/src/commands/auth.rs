// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use crate::api::{Credentials, TokenSigner};
use crate::cli::{AuthCommand, OutputMode};
use crate::commands::CliError;

pub(crate) async fn run(command: AuthCommand, _output: OutputMode) -> Result<(), CliError> {
    match command {
        AuthCommand::Login {
            issuer_id,
            key_id,
            private_key_path,
        } => {
            let key_path = Path::new(&private_key_path);
            if !key_path.exists() {
                return Err(CliError::Invalid(format!(
                    "private key file not found: {private_key_path}"
                )));
            }
            let Some(path) = Credentials::default_path() else {
                return Err(CliError::Invalid(
                    "could not determine the config directory".to_string(),
                ));
            };
            Credentials::write_file(&path, &issuer_id, &key_id, key_path)?;
            println!("credentials written to {}", path.display());
        }
        AuthCommand::Status => {
            let source = if Credentials::from_env()?.is_some() {
                "environment".to_string()
            } else {
                match Credentials::default_path() {
                    Some(path) if path.exists() => path.display().to_string(),
                    _ => {
                        println!("not logged in");
                        return Ok(());
                    }
                }
            };
            let credentials = Credentials::load()?;
            println!("credentials: {source}");
            println!("issuer: {}", credentials.issuer_id);
            println!("key id: {}", credentials.key_id);
            // Prove the key signs before the first real request needs it.
            TokenSigner::new(credentials).token()?;
            println!("token: ok");
        }
    }
    Ok(())
}
