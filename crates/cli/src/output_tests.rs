// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use serde_json::{json, Value};

use super::*;

#[test]
fn cells_render_without_json_quoting() {
    assert_eq!(cell(None), "-");
    assert_eq!(cell(Some(&Value::Null)), "-");
    assert_eq!(cell(Some(&json!("ONE_MONTH"))), "ONE_MONTH");
    assert_eq!(cell(Some(&json!(true))), "true");
    assert_eq!(cell(Some(&json!(42))), "42");
}

#[test]
fn printing_empty_and_populated_tables_does_not_panic() {
    print_resources(OutputMode::Table, &[], &["name"]);

    let resource = Resource::new(
        "apps",
        "app_1",
        json!({"name": "Test App", "bundleId": null})
            .as_object()
            .cloned()
            .unwrap_or_default(),
    );
    print_resources(OutputMode::Table, &[resource.clone()], &["name", "bundleId"]);
    print_resources(OutputMode::Json, &[resource.clone()], &[]);
    print_resource(OutputMode::Table, &resource);
    print_resource(OutputMode::Json, &resource);
}
