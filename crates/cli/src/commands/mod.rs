// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command execution: one module per top-level subcommand.

mod apply;
mod apps;
mod auth;
mod beta;
mod subscriptions;

use std::sync::Arc;

use thiserror::Error;

use crate::api::{ApiError, AuthError, Credentials, ReqwestTransport, StorefrontClient, TokenSigner};
use crate::cli::{Cli, Command, OutputMode};
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Invalid(String),
}

/// Execute a parsed invocation against the live API.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Auth(command) => auth::run(command, cli.output).await,
        command => {
            let client = live_client()?;
            dispatch(&client, command, cli.output).await
        }
    }
}

/// Execute against an explicit client, used by tests to run commands over
/// a simulated transport.
pub async fn dispatch(
    client: &StorefrontClient,
    command: Command,
    output: OutputMode,
) -> Result<(), CliError> {
    match command {
        Command::Auth(command) => auth::run(command, output).await,
        Command::Apps(command) => apps::run(client, command, output).await,
        Command::Subscriptions(command) => subscriptions::run(client, command, output).await,
        Command::Beta(command) => beta::run(client, command, output).await,
        Command::Apply(args) => apply::run(client, args).await,
    }
}

fn live_client() -> Result<StorefrontClient, CliError> {
    let credentials = Credentials::load()?;
    let signer = TokenSigner::new(credentials);
    Ok(StorefrontClient::new(Arc::new(ReqwestTransport::new(
        signer,
    ))))
}
