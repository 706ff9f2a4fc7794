// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Territory endpoints.

use storefront_protocol::{ApiResponse, Resource};

use crate::document;
use crate::request::RouteRequest;
use crate::store::EntityStore;

/// GET /territories.
pub(crate) fn list_territories(_request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let territories: Vec<&Resource> = store.territories.values().collect();
    ApiResponse::json(200, document::many(&territories))
}
