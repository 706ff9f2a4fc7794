// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Price point, price, and equalization endpoints.

use std::collections::HashSet;

use storefront_protocol::{attr_bool, attr_str, rel_id, ApiResponse, Resource};

use crate::document;
use crate::request::RouteRequest;
use crate::store::EntityStore;
use crate::validate;

/// GET /subscriptions/{id}/pricePoints.
///
/// Supports `filter[territory]`, `include=territory` (deduplicated), and
/// offset/limit pagination with a default page size of 200.
pub(crate) fn list_price_points(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let subscription_id = request.param("subscription_id");
    if !store.subscriptions.contains(subscription_id) {
        return document::not_found("Subscription", subscription_id);
    }

    let mut points: Vec<&Resource> = store
        .price_points_by_subscription
        .get(subscription_id)
        .map_or(&[][..], Vec::as_slice)
        .iter()
        .filter_map(|id| store.subscription_price_points.get(id))
        .collect();

    if let Some(territory) = request.query("filter[territory]") {
        points.retain(|point| point.relationship_id("territory") == Some(territory));
    }

    let limit = request.query_usize("limit", 200);
    let offset = request.query_usize("offset", 0);

    let included = if request.includes("territory") {
        page_territories(store, &points, limit, offset)
    } else {
        Vec::new()
    };

    ApiResponse::json(
        200,
        document::paginated(&points, &request.base_url(), limit, offset, included),
    )
}

/// GET /subscriptionPricePoints/{id}/equalizations.
///
/// Every price point whose territory differs from the base point's,
/// paginated like the price point listing.
pub(crate) fn list_equalizations(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let price_point_id = request.param("price_point_id");
    let Some(base) = store.subscription_price_points.get(price_point_id) else {
        return document::not_found("SubscriptionPricePoint", price_point_id);
    };
    let base_territory = base.relationship_id("territory");

    let equalizations: Vec<&Resource> = store
        .subscription_price_points
        .values()
        .filter(|point| {
            point.id != price_point_id && point.relationship_id("territory") != base_territory
        })
        .collect();

    let limit = request.query_usize("limit", 200);
    let offset = request.query_usize("offset", 0);

    ApiResponse::json(
        200,
        document::paginated(&equalizations, &request.base_url(), limit, offset, Vec::new()),
    )
}

/// GET /subscriptions/{id}/prices.
pub(crate) fn list_prices(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let subscription_id = request.param("subscription_id");
    if !store.subscriptions.contains(subscription_id) {
        return document::not_found("Subscription", subscription_id);
    }

    let prices: Vec<&Resource> = store
        .prices_by_subscription
        .get(subscription_id)
        .map_or(&[][..], Vec::as_slice)
        .iter()
        .filter_map(|id| store.subscription_prices.get(id))
        .collect();

    ApiResponse::json(200, document::many(&prices))
}

/// POST /subscriptionPrices.
pub(crate) fn create_price(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let body = &request.body;
    if let Err(failure) = validate::price_request(body) {
        return document::failure(&failure);
    }

    let subscription_id = rel_id(body, "subscription").unwrap_or("").to_string();
    let price_point_id = rel_id(body, "subscriptionPricePoint").unwrap_or("").to_string();

    if !store.subscriptions.contains(&subscription_id) {
        return document::not_found("Subscription", &subscription_id);
    }
    if !store.subscription_price_points.contains(&price_point_id) {
        return document::not_found("SubscriptionPricePoint", &price_point_id);
    }

    let start_date = attr_str(body, "startDate").map(str::to_string);
    let preserved = attr_bool(body, "preserveCurrentPrice").unwrap_or(false);

    let price_id = store.next_id("price_");
    let price = store.add_subscription_price(
        &price_id,
        &subscription_id,
        &price_point_id,
        start_date.as_deref(),
        preserved,
    );
    ApiResponse::json(201, document::one(&price))
}

/// Territories referenced by the current page of price points, deduplicated
/// in first-seen order.
fn page_territories<'a>(
    store: &'a EntityStore,
    points: &[&Resource],
    limit: usize,
    offset: usize,
) -> Vec<&'a Resource> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut territories = Vec::new();
    for point in points.iter().skip(offset).take(limit) {
        let Some(territory_id) = point.relationship_id("territory") else {
            continue;
        };
        if seen.insert(territory_id) {
            if let Some(territory) = store.territories.get(territory_id) {
                territories.push(territory);
            }
        }
    }
    territories
}
