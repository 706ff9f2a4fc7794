// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Response document builders.
//!
//! Pure transforms from stored resources to the wire shape. Handlers call
//! these and nothing else to produce bodies, so every response the engine
//! emits is envelope-correct by construction.

use serde_json::{json, Value};
use storefront_protocol::{ApiResponse, Resource};

use crate::validate::ValidationError;

fn resource_json(resource: &Resource) -> Value {
    serde_json::to_value(resource).unwrap_or_default()
}

/// `{"data": {...}}` for a single resource.
pub(crate) fn one(resource: &Resource) -> Value {
    json!({ "data": resource_json(resource) })
}

/// `{"data": {...}, "included": [...]}` when related resources are attached.
pub(crate) fn one_with(resource: &Resource, included: Vec<&Resource>) -> Value {
    if included.is_empty() {
        return one(resource);
    }
    let included: Vec<Value> = included.iter().map(|r| resource_json(r)).collect();
    json!({ "data": resource_json(resource), "included": included })
}

/// `{"data": [...]}` for a resource list.
pub(crate) fn many(resources: &[&Resource]) -> Value {
    let data: Vec<Value> = resources.iter().map(|r| resource_json(r)).collect();
    json!({ "data": data })
}

/// `{"data": null}`, the "nothing here yet" document.
pub(crate) fn null_data() -> Value {
    json!({ "data": null })
}

/// Page of a list with `self`/`next`/`prev` links.
///
/// `next` appears only while `offset + limit < total` and always points at
/// `{base_url}?limit={limit}&offset={offset + limit}` as an absolute URL.
pub(crate) fn paginated(
    resources: &[&Resource],
    base_url: &str,
    limit: usize,
    offset: usize,
    included: Vec<&Resource>,
) -> Value {
    // A zero limit would mint a next link whose offset never advances.
    let limit = limit.max(1);
    let total = resources.len();
    let page: Vec<Value> = resources
        .iter()
        .skip(offset)
        .take(limit)
        .map(|r| resource_json(r))
        .collect();

    let mut links = json!({
        "self": format!("{base_url}?limit={limit}&offset={offset}"),
    });
    if offset + limit < total {
        links["next"] = Value::String(format!(
            "{base_url}?limit={limit}&offset={}",
            offset + limit
        ));
    }
    if offset > 0 {
        links["prev"] = Value::String(format!(
            "{base_url}?limit={limit}&offset={}",
            offset.saturating_sub(limit)
        ));
    }

    let mut body = json!({ "data": page, "links": links });
    if !included.is_empty() {
        let included: Vec<Value> = included.iter().map(|r| resource_json(r)).collect();
        body["included"] = Value::Array(included);
    }
    body
}

/// `{"errors": [...]}` with a single error object.
pub(crate) fn error(status: u16, code: &str, title: &str, detail: &str) -> Value {
    json!({
        "errors": [{
            "status": status.to_string(),
            "code": code,
            "title": title,
            "detail": detail,
        }]
    })
}

fn error_with_pointer(status: u16, code: &str, title: &str, detail: &str, pointer: &str) -> Value {
    json!({
        "errors": [{
            "status": status.to_string(),
            "code": code,
            "title": title,
            "detail": detail,
            "source": { "pointer": pointer },
        }]
    })
}

/// 404 for an absent referenced resource.
pub(crate) fn not_found(kind: &str, id: &str) -> ApiResponse {
    ApiResponse::json(
        404,
        error(404, "NOT_FOUND", "Not Found", &format!("{kind} with id '{id}' not found")),
    )
}

/// 400 for a malformed attribute, pointing at the offending field.
pub(crate) fn invalid_field(field: &str, detail: &str) -> ApiResponse {
    ApiResponse::json(
        400,
        error_with_pointer(
            400,
            "INVALID_REQUEST",
            "Invalid Request",
            detail,
            &format!("/data/attributes/{field}"),
        ),
    )
}

/// Response for a typed validation failure; the title repeats the code,
/// matching the backend's behavior for rule violations.
pub(crate) fn failure(failure: &ValidationError) -> ApiResponse {
    ApiResponse::json(
        failure.status,
        error(failure.status, &failure.code, &failure.code, &failure.detail),
    )
}

/// 429 body; the `Retry-After` header is attached by the dispatcher.
pub(crate) fn rate_limited() -> Value {
    error(
        429,
        "RATE_LIMIT_EXCEEDED",
        "Rate Limit Exceeded",
        "Too many requests. Please retry after 60 seconds.",
    )
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
