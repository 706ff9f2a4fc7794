// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative bulk apply, end to end and re-applied.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{client_with_catalog, with_store};
use storefront_cli::cli::{ApplyArgs, Command, OutputMode};
use storefront_cli::commands;
use storefront_sim::fixtures;

const SUB: &str = "sub_app_123";

const CONFIG: &str = r#"
[[subscriptions]]
product_id = "com.example.test.premium.monthly"
period = "ONE_MONTH"
availability = ["USA", "GBR"]

[[subscriptions.prices]]
territory = "USA"
price = "9.99"

[[subscriptions.offers]]
territory = "USA"
mode = "FREE_TRIAL"
duration = "ONE_WEEK"
"#;

fn write_config(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("apply.toml");
    std::fs::write(&path, CONFIG).unwrap();
    path.display().to_string()
}

async fn apply(client: &storefront_cli::api::StorefrontClient, file: &str) {
    let command = Command::Apply(ApplyArgs {
        file: file.to_string(),
        app: "app_123".to_string(),
    });
    commands::dispatch(client, command, OutputMode::Table)
        .await
        .unwrap();
}

#[tokio::test]
async fn apply_configures_a_fresh_subscription() {
    let (sim, client) = client_with_catalog(None);
    with_store(&sim, |store| {
        fixtures::generate_price_points(store, SUB, Some(&["USA"]));
    });
    let dir = tempfile::TempDir::new().unwrap();
    let file = write_config(&dir);

    apply(&client, &file).await;

    let subscription = client.get_subscription(SUB).await.unwrap();
    assert_eq!(subscription.attr_str("subscriptionPeriod"), Some("ONE_MONTH"));
    assert_eq!(client.list_prices(SUB).await.unwrap().len(), 1);
    assert_eq!(client.list_offers(SUB).await.unwrap().len(), 1);

    let availability = client.get_availability(SUB, false).await.unwrap().unwrap();
    assert_eq!(
        availability.relationship_ids("availableTerritories"),
        ["USA", "GBR"]
    );
}

#[tokio::test]
async fn reapplying_performs_no_duplicate_writes() {
    let (sim, client) = client_with_catalog(None);
    with_store(&sim, |store| {
        fixtures::generate_price_points(store, SUB, Some(&["USA"]));
    });
    let dir = tempfile::TempDir::new().unwrap();
    let file = write_config(&dir);

    apply(&client, &file).await;
    apply(&client, &file).await;

    assert_eq!(client.list_prices(SUB).await.unwrap().len(), 1);
    assert_eq!(client.list_offers(SUB).await.unwrap().len(), 1);
}

#[tokio::test]
async fn apply_names_the_missing_subscription() {
    let (_sim, client) = client_with_catalog(None);
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("apply.toml");
    std::fs::write(
        &path,
        "[[subscriptions]]\nproduct_id = \"com.example.other\"\n",
    )
    .unwrap();

    let command = Command::Apply(ApplyArgs {
        file: path.display().to_string(),
        app: "app_123".to_string(),
    });
    let error = commands::dispatch(&client, command, OutputMode::Table)
        .await
        .unwrap_err();
    assert!(error.to_string().contains("com.example.other"));
}
