// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::api::StorefrontClient;
use crate::cli::{AppsCommand, OutputMode};
use crate::commands::CliError;
use crate::output::{print_resource, print_resources};

pub(crate) async fn run(
    client: &StorefrontClient,
    command: AppsCommand,
    output: OutputMode,
) -> Result<(), CliError> {
    match command {
        AppsCommand::List { bundle_id } => {
            let apps = client.list_apps(bundle_id.as_deref()).await?;
            print_resources(output, &apps, &["bundleId", "name", "primaryLocale"]);
        }
        AppsCommand::Show { app_id } => {
            let app = client.get_app(&app_id).await?;
            print_resource(output, &app);
        }
    }
    Ok(())
}
