// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Storefront CLI binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use storefront_cli::cli::Cli;
use storefront_cli::commands;
use storefront_cli::output::print_error;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = commands::run(cli).await {
        print_error(e);
        std::process::exit(1);
    }
}
