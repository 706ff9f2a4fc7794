// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Table and JSON rendering of API resources.

use serde_json::Value;
use storefront_protocol::Resource;

use crate::cli::OutputMode;

/// Print a list of resources: aligned columns in table mode, a pretty JSON
/// array in JSON mode. Columns are attribute names; the id column is always
/// first.
pub fn print_resources(mode: OutputMode, resources: &[Resource], columns: &[&str]) {
    match mode {
        OutputMode::Json => print_json(resources),
        OutputMode::Table => print_table(resources, columns),
    }
}

/// Print a single resource: `field: value` lines in table mode.
pub fn print_resource(mode: OutputMode, resource: &Resource) {
    match mode {
        OutputMode::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(resource).unwrap_or_default()
            );
        }
        OutputMode::Table => {
            println!("id: {}", resource.id);
            println!("type: {}", resource.kind);
            for (name, value) in &resource.attributes {
                println!("{name}: {}", cell(Some(value)));
            }
        }
    }
}

pub fn print_error(message: impl std::fmt::Display) {
    eprintln!("error: {message}");
}

fn print_json(resources: &[Resource]) {
    println!(
        "{}",
        serde_json::to_string_pretty(resources).unwrap_or_default()
    );
}

fn print_table(resources: &[Resource], columns: &[&str]) {
    if resources.is_empty() {
        println!("(none)");
        return;
    }

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(resources.len() + 1);
    let mut header: Vec<String> = vec!["id".to_string()];
    header.extend(columns.iter().map(|c| (*c).to_string()));
    rows.push(header);
    for resource in resources {
        let mut row = vec![resource.id.clone()];
        row.extend(columns.iter().map(|column| cell(resource.attr(column))));
        rows.push(row);
    }

    let mut widths = vec![0usize; rows[0].len()];
    for row in &rows {
        for (i, value) in row.iter().enumerate() {
            widths[i] = widths[i].max(value.len());
        }
    }
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, value)| format!("{value:<width$}", width = widths[i]))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }
}

/// Render an attribute value without JSON string quoting.
fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
