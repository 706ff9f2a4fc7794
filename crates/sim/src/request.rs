// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized view of an intercepted request.

use std::collections::HashMap;

use serde_json::Value;
use storefront_protocol::{ApiRequest, Method, BASE_URL};

/// An [`ApiRequest`] with the base URL stripped, the query parsed, and the
/// dispatcher's path captures attached.
#[derive(Debug)]
pub(crate) struct RouteRequest {
    pub method: Method,
    /// Path under `/v1`, query removed (e.g. `/subscriptions/sub_1`).
    pub path: String,
    query: Vec<(String, String)>,
    params: HashMap<String, String>,
    pub body: Value,
}

impl RouteRequest {
    /// Normalize a raw request. Absolute URLs under the base (pagination
    /// `next` links) and bare paths both reduce to the same form.
    pub fn parse(request: &ApiRequest) -> Self {
        let url = request.url.strip_prefix(BASE_URL).unwrap_or(&request.url);
        let (path, query_str) = match url.split_once('?') {
            Some((path, query)) => (path, query),
            None => (url, ""),
        };
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let query = query_str
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();

        Self {
            method: request.method,
            path,
            query,
            params: HashMap::new(),
            body: request.body.clone().unwrap_or(Value::Null),
        }
    }

    pub fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    /// A path capture by name. Dispatch guarantees the capture exists for
    /// the handler it routes to; absent names read as empty.
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).map_or("", String::as_str)
    }

    /// First query value for a key (e.g. `filter[territory]`).
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Numeric query parameter, falling back on missing or malformed input.
    pub fn query_usize(&self, key: &str, default: usize) -> usize {
        self.query(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    }

    /// Whether `include=` names the given related resource.
    pub fn includes(&self, name: &str) -> bool {
        self.query("include")
            .is_some_and(|value| value.split(',').any(|part| part == name))
    }

    /// Absolute URL for this path, used as the pagination link base.
    pub fn base_url(&self) -> String {
        format!("{BASE_URL}{}", self.path)
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
