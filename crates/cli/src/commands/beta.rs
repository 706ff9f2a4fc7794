// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::api::{BetaGroupParams, StorefrontClient};
use crate::cli::{BetaCommand, OutputMode};
use crate::commands::CliError;
use crate::output::{print_resource, print_resources};

pub(crate) async fn run(
    client: &StorefrontClient,
    command: BetaCommand,
    output: OutputMode,
) -> Result<(), CliError> {
    match command {
        BetaCommand::Builds {
            app,
            version,
            processing_state,
        } => {
            let builds = client
                .list_builds(&app, version.as_deref(), processing_state.as_deref())
                .await?;
            print_resources(
                output,
                &builds,
                &["version", "uploadedDate", "processingState"],
            );
        }
        BetaCommand::Groups { app } => {
            let groups = client.list_beta_groups(&app).await?;
            print_resources(
                output,
                &groups,
                &["name", "isInternalGroup", "publicLinkEnabled", "publicLink"],
            );
        }
        BetaCommand::CreateGroup {
            name,
            app,
            internal,
            public_link,
            public_link_limit,
            no_feedback,
        } => {
            let group = client
                .create_beta_group(&BetaGroupParams {
                    app_id: &app,
                    name: &name,
                    internal,
                    public_link_enabled: public_link,
                    public_link_limit,
                    feedback_enabled: !no_feedback,
                })
                .await?;
            print_resource(output, &group);
        }
        BetaCommand::DeleteGroup { group_id } => {
            client.delete_beta_group(&group_id).await?;
            println!("deleted {group_id}");
        }
        BetaCommand::AddBuilds { group_id, builds } => {
            client.add_builds_to_beta_group(&group_id, &builds).await?;
            println!("added {} build(s) to {group_id}", builds.len());
        }
        BetaCommand::Testers { email, app } => {
            let testers = client
                .list_beta_testers(email.as_deref(), app.as_deref())
                .await?;
            print_resources(
                output,
                &testers,
                &["email", "firstName", "lastName", "inviteType"],
            );
        }
        BetaCommand::AddTester {
            email,
            first_name,
            last_name,
            groups,
        } => {
            let tester = client
                .create_beta_tester(
                    &email,
                    first_name.as_deref(),
                    last_name.as_deref(),
                    &groups,
                )
                .await?;
            print_resource(output, &tester);
        }
        BetaCommand::RemoveTester { tester_id, groups } => {
            client.remove_tester_from_groups(&tester_id, &groups).await?;
            println!("removed {tester_id} from {} group(s)", groups.len());
        }
        BetaCommand::DeleteTester { tester_id } => {
            client.delete_beta_tester(&tester_id).await?;
            println!("deleted {tester_id}");
        }
    }
    Ok(())
}
