// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatcher: route matching plus fault injection.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use regex::Regex;
use storefront_protocol::{ApiRequest, ApiResponse, Method, Transport, TransportError};

use crate::document;
use crate::request::RouteRequest;
use crate::routes::{self, Handler};
use crate::store::EntityStore;

struct CompiledRoute {
    method: Method,
    pattern: Regex,
    handler: Handler,
}

struct ErrorOverride {
    pattern: Regex,
    status: u16,
    code: String,
    detail: String,
}

struct EngineState {
    store: EntityStore,
    force_rate_limit: bool,
    overrides: Vec<ErrorOverride>,
}

/// In-process simulation of the storefront API.
///
/// Routes are matched in registration order, first match wins. Fault
/// injection runs before any handler logic: a single-shot armed rate limit
/// answers 429 once, then regex path overrides, then normal dispatch. Every
/// request produces a response; unmatched paths answer 404.
///
/// Handling is synchronous under a mutex. The engine is scoped to one test
/// at a time; construct one per test or call [`Simulator::reset`] between
/// tests.
pub struct Simulator {
    routes: Vec<CompiledRoute>,
    state: Mutex<EngineState>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    pub fn new() -> Self {
        let routes = routes::table()
            .into_iter()
            .filter_map(|route| {
                Regex::new(route.pattern).ok().map(|pattern| CompiledRoute {
                    method: route.method,
                    pattern,
                    handler: route.handler,
                })
            })
            .collect();
        Self {
            routes,
            state: Mutex::new(EngineState {
                store: EntityStore::new(),
                force_rate_limit: false,
                overrides: Vec::new(),
            }),
        }
    }

    /// Run a closure against the entity store, for fixture setup and
    /// assertions.
    pub fn store<R>(&self, f: impl FnOnce(&mut EntityStore) -> R) -> R {
        f(&mut self.state.lock().store)
    }

    /// Clear the store and the armed rate limit. Error overrides persist
    /// until [`Simulator::clear_error_overrides`].
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.store.reset();
        state.force_rate_limit = false;
    }

    /// Arm a single 429 on the next request, whatever it is.
    pub fn simulate_rate_limit(&self) {
        self.state.lock().force_rate_limit = true;
    }

    /// Force every request whose path matches the regex to answer the given
    /// error instead of dispatching.
    pub fn simulate_error(
        &self,
        path_pattern: &str,
        status: u16,
        code: &str,
        detail: &str,
    ) -> Result<(), regex::Error> {
        let pattern = Regex::new(path_pattern)?;
        self.state.lock().overrides.push(ErrorOverride {
            pattern,
            status,
            code: code.to_string(),
            detail: detail.to_string(),
        });
        Ok(())
    }

    pub fn clear_error_overrides(&self) {
        self.state.lock().overrides.clear();
    }

    /// Answer one request. Never panics across this boundary; anything the
    /// route table does not cover comes back as a 404 document.
    pub fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let mut route_request = RouteRequest::parse(request);
        let mut state = self.state.lock();

        if state.force_rate_limit {
            state.force_rate_limit = false;
            tracing::debug!(path = %route_request.path, "answering armed rate limit");
            return ApiResponse::json(429, document::rate_limited()).with_header("Retry-After", "60");
        }

        if let Some(forced) = state
            .overrides
            .iter()
            .find(|o| o.pattern.is_match(&route_request.path))
        {
            tracing::debug!(
                path = %route_request.path,
                status = forced.status,
                code = %forced.code,
                "answering error override"
            );
            return ApiResponse::json(
                forced.status,
                document::error(forced.status, &forced.code, &forced.code, &forced.detail),
            );
        }

        for route in &self.routes {
            if route.method != route_request.method {
                continue;
            }
            let Some(captures) = route.pattern.captures(&route_request.path) else {
                continue;
            };
            let mut params = HashMap::new();
            for name in route.pattern.capture_names().flatten() {
                if let Some(value) = captures.name(name) {
                    params.insert(name.to_string(), value.as_str().to_string());
                }
            }
            route_request.set_params(params);
            tracing::debug!(
                method = %route_request.method,
                path = %route_request.path,
                pattern = route.pattern.as_str(),
                "dispatching"
            );
            return (route.handler)(&route_request, &mut state.store);
        }

        tracing::debug!(method = %route_request.method, path = %route_request.path, "no route");
        ApiResponse::json(
            404,
            document::error(
                404,
                "NOT_FOUND",
                "Not Found",
                &format!("No route matches {} {}", route_request.method, route_request.path),
            ),
        )
    }
}

#[async_trait]
impl Transport for Simulator {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        Ok(self.handle(&request))
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
