// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subscription, group, localization, and availability endpoints.

use serde_json::json;
use storefront_protocol::{
    attr, attr_bool, data_id, data_type, rel_id, rel_ids, ApiResponse, Resource,
};

use crate::document;
use crate::request::RouteRequest;
use crate::store::EntityStore;
use crate::validate;

/// GET /apps/{id}/subscriptionGroups.
pub(crate) fn list_subscription_groups(
    request: &RouteRequest,
    store: &mut EntityStore,
) -> ApiResponse {
    let app_id = request.param("app_id");
    if !store.apps.contains(app_id) {
        return document::not_found("App", app_id);
    }
    let groups = children(store, &store.app_subscription_groups, app_id, |s, id| {
        s.subscription_groups.get(id)
    });
    ApiResponse::json(200, document::many(&groups))
}

/// GET /subscriptionGroups/{id}/subscriptions.
pub(crate) fn list_subscriptions(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let group_id = request.param("group_id");
    if !store.subscription_groups.contains(group_id) {
        return document::not_found("SubscriptionGroup", group_id);
    }
    let subscriptions = children(store, &store.group_subscriptions, group_id, |s, id| {
        s.subscriptions.get(id)
    });
    ApiResponse::json(200, document::many(&subscriptions))
}

/// GET /subscriptions/{id}.
pub(crate) fn get_subscription(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let subscription_id = request.param("subscription_id");
    match store.subscriptions.get(subscription_id) {
        Some(subscription) => ApiResponse::json(200, document::one(subscription)),
        None => document::not_found("Subscription", subscription_id),
    }
}

/// PATCH /subscriptions/{id}.
///
/// The only modeled mutation is setting `subscriptionPeriod`, which is
/// immutable once non-null. Existence is checked before any body
/// validation.
pub(crate) fn update_subscription(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let subscription_id = request.param("subscription_id");
    if !store.subscriptions.contains(subscription_id) {
        return document::not_found("Subscription", subscription_id);
    }

    let body = &request.body;
    if body.get("data").is_none() || data_type(body) != Some("subscriptions") {
        return ApiResponse::json(
            400,
            document::error(400, "INVALID_REQUEST", "Bad Request", "Invalid request structure"),
        );
    }
    if data_id(body) != Some(subscription_id) {
        return ApiResponse::json(
            400,
            document::error(400, "INVALID_REQUEST", "Bad Request", "ID mismatch in request"),
        );
    }

    if let Some(requested) = attr(body, "subscriptionPeriod") {
        let requested = requested.as_str().unwrap_or("").to_string();
        let current = store
            .subscriptions
            .get(subscription_id)
            .and_then(|s| s.attr_str("subscriptionPeriod"))
            .map(str::to_string);
        if let Err(failure) = validate::period_change(current.as_deref(), &requested) {
            return document::failure(&failure);
        }
        if let Some(subscription) = store.subscriptions.get_mut(subscription_id) {
            subscription
                .attributes
                .insert("subscriptionPeriod".to_string(), json!(requested));
        }
    }

    match store.subscriptions.get(subscription_id) {
        Some(subscription) => ApiResponse::json(200, document::one(subscription)),
        None => document::not_found("Subscription", subscription_id),
    }
}

/// GET /subscriptions/{id}/subscriptionLocalizations.
pub(crate) fn list_localizations(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let subscription_id = request.param("subscription_id");
    if !store.subscriptions.contains(subscription_id) {
        return document::not_found("Subscription", subscription_id);
    }
    let localizations = children(
        store,
        &store.localizations_by_subscription,
        subscription_id,
        |s, id| s.subscription_localizations.get(id),
    );
    ApiResponse::json(200, document::many(&localizations))
}

/// GET /subscriptions/{id}/subscriptionAvailability.
///
/// Answers `{"data": null}` when no availability has been set yet;
/// `include=availableTerritories` attaches the territory resources.
pub(crate) fn get_availability(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let subscription_id = request.param("subscription_id");
    if !store.subscriptions.contains(subscription_id) {
        return document::not_found("Subscription", subscription_id);
    }

    let availability_id = format!("avail_{subscription_id}");
    let Some(availability) = store.subscription_availabilities.get(&availability_id) else {
        return ApiResponse::json(200, document::null_data());
    };

    let included: Vec<&Resource> = if request.includes("availableTerritories") {
        store
            .subscription_availability_territories(subscription_id)
            .iter()
            .filter_map(|territory_id| store.territories.get(territory_id))
            .collect()
    } else {
        Vec::new()
    };

    ApiResponse::json(200, document::one_with(availability, included))
}

/// POST /subscriptionAvailabilities.
pub(crate) fn create_availability(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let body = &request.body;
    if let Err(failure) = validate::availability_request(body) {
        return document::failure(&failure);
    }

    let subscription_id = rel_id(body, "subscription").unwrap_or("");
    if !store.subscriptions.contains(subscription_id) {
        return document::not_found("Subscription", subscription_id);
    }

    let territory_ids: Vec<String> = rel_ids(body, "availableTerritories")
        .into_iter()
        .map(str::to_string)
        .collect();
    let available_in_new = attr_bool(body, "availableInNewTerritories").unwrap_or(true);

    let availability =
        store.set_subscription_availability(subscription_id, &territory_ids, available_in_new);
    ApiResponse::json(201, document::one(&availability))
}

/// Resolve an index entry to its resources, skipping ids that no longer
/// exist.
fn children<'a>(
    store: &'a EntityStore,
    index: &'a std::collections::HashMap<String, Vec<String>>,
    parent_id: &str,
    lookup: fn(&'a EntityStore, &str) -> Option<&'a Resource>,
) -> Vec<&'a Resource> {
    index
        .get(parent_id)
        .map_or(&[][..], Vec::as_slice)
        .iter()
        .filter_map(|id| lookup(store, id))
        .collect()
}
