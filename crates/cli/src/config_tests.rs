// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

const SAMPLE: &str = r#"
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

#[test]
fn parses_a_full_config() {
    let config: ApplyConfig = toml::from_str(SAMPLE).unwrap();
    assert_eq!(config.subscriptions.len(), 1);

    let subscription = &config.subscriptions[0];
    assert_eq!(subscription.product_id, "com.example.test.premium.monthly");
    assert_eq!(subscription.period.as_deref(), Some("ONE_MONTH"));
    assert_eq!(subscription.availability, ["USA", "GBR"]);
    assert_eq!(subscription.prices[0].price, "9.99");
    assert!(!subscription.prices[0].preserve_current);
    assert_eq!(subscription.offers[0].number_of_periods, 1);
    assert!(subscription.offers[0].price.is_none());
}

#[test]
fn rejects_unknown_fields() {
    let result: Result<ApplyConfig, _> = toml::from_str(
        r#"
[[subscriptions]]
product_id = "x"
colour = "blue"
"#,
    );
    assert!(result.is_err());
}

#[test]
fn load_reports_the_path_on_parse_errors() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "subscriptions = 3").unwrap();

    let error = ApplyConfig::load(&path).unwrap_err();
    assert!(matches!(error, ConfigError::Parse { .. }));
    assert!(error.to_string().contains("bad.toml"));
}

#[test]
fn missing_file_is_an_io_error() {
    let error = ApplyConfig::load(std::path::Path::new("/nonexistent/apply.toml")).unwrap_err();
    assert!(matches!(error, ConfigError::Io { .. }));
}
