// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! App endpoints.

use storefront_protocol::{ApiResponse, Resource};

use crate::document;
use crate::request::RouteRequest;
use crate::store::EntityStore;

/// GET /apps, optionally filtered by `filter[bundleId]`.
pub(crate) fn list_apps(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let mut apps: Vec<&Resource> = store.apps.values().collect();
    if let Some(bundle_id) = request.query("filter[bundleId]") {
        apps.retain(|app| app.attr_str("bundleId") == Some(bundle_id));
    }
    ApiResponse::json(200, document::many(&apps))
}

/// GET /apps/{id}.
pub(crate) fn get_app(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let app_id = request.param("app_id");
    match store.apps.get(app_id) {
        Some(app) => ApiResponse::json(200, document::one(app)),
        None => document::not_found("App", app_id),
    }
}
