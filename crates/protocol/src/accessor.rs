// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed accessors for untyped request payloads.
//!
//! Inbound POST/PATCH bodies arrive as raw `serde_json::Value`. Validators
//! and route handlers read them through these functions instead of chaining
//! optional lookups inline, so an absent field is always an explicit `None`
//! and rule-ordering stays deterministic.

use serde_json::{Map, Value};

/// The top-level `data` object of a request document.
pub fn document_data(body: &Value) -> Option<&Value> {
    let data = body.get("data")?;
    data.is_object().then_some(data)
}

/// `data.type`.
pub fn data_type(body: &Value) -> Option<&str> {
    document_data(body)?.get("type")?.as_str()
}

/// `data.id`.
pub fn data_id(body: &Value) -> Option<&str> {
    document_data(body)?.get("id")?.as_str()
}

/// `data.attributes` as a map.
pub fn attributes(body: &Value) -> Option<&Map<String, Value>> {
    document_data(body)?.get("attributes")?.as_object()
}

/// `data.relationships` as a map.
pub fn relationships(body: &Value) -> Option<&Map<String, Value>> {
    document_data(body)?.get("relationships")?.as_object()
}

/// A single attribute value. Present-but-null reads as `Some(Value::Null)`.
pub fn attr<'a>(body: &'a Value, name: &str) -> Option<&'a Value> {
    attributes(body)?.get(name)
}

/// A string attribute.
pub fn attr_str<'a>(body: &'a Value, name: &str) -> Option<&'a str> {
    attr(body, name)?.as_str()
}

/// An integer attribute.
pub fn attr_i64(body: &Value, name: &str) -> Option<i64> {
    attr(body, name)?.as_i64()
}

/// A boolean attribute.
pub fn attr_bool(body: &Value, name: &str) -> Option<bool> {
    attr(body, name)?.as_bool()
}

/// Whether a relationship key is present at all, regardless of shape.
pub fn has_rel(body: &Value, name: &str) -> bool {
    relationships(body).is_some_and(|rels| rels.contains_key(name))
}

/// Id of a to-one relationship: `data.relationships.{name}.data.id`.
pub fn rel_id<'a>(body: &'a Value, name: &str) -> Option<&'a str> {
    relationships(body)?.get(name)?.get("data")?.get("id")?.as_str()
}

/// Ids of a to-many relationship: `data.relationships.{name}.data[].id`.
pub fn rel_ids<'a>(body: &'a Value, name: &str) -> Vec<&'a str> {
    let Some(entries) = relationships(body)
        .and_then(|rels| rels.get(name))
        .and_then(|rel| rel.get("data"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| entry.get("id").and_then(Value::as_str))
        .collect()
}

/// Ids in a relationship-endpoint body, where `data` is a bare linkage array
/// (`{"data": [{"type": ..., "id": ...}, ...]}`).
pub fn linkage_ids(body: &Value) -> Vec<&str> {
    let Some(entries) = body.get("data").and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| entry.get("id").and_then(Value::as_str))
        .collect()
}

#[cfg(test)]
#[path = "accessor_tests.rs"]
mod tests;
