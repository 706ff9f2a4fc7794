// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Introductory offer endpoints.

use storefront_protocol::{attr_i64, attr_str, rel_id, ApiResponse, Resource};

use crate::document;
use crate::request::RouteRequest;
use crate::store::EntityStore;
use crate::validate;

/// GET /subscriptions/{id}/introductoryOffers.
pub(crate) fn list_offers(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let subscription_id = request.param("subscription_id");
    if !store.subscriptions.contains(subscription_id) {
        return document::not_found("Subscription", subscription_id);
    }

    let offers: Vec<&Resource> = store
        .offers_by_subscription
        .get(subscription_id)
        .map_or(&[][..], Vec::as_slice)
        .iter()
        .filter_map(|id| store.introductory_offers.get(id))
        .collect();

    ApiResponse::json(200, document::many(&offers))
}

/// POST /subscriptionIntroductoryOffers.
///
/// Order of failure matters to callers: target existence (404), then
/// structural and attribute validation, then the duration/period table,
/// then the one-offer-per-territory conflict (409).
pub(crate) fn create_offer(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let body = &request.body;

    let subscription_id = rel_id(body, "subscription").unwrap_or("").to_string();
    if !subscription_id.is_empty() && !store.subscriptions.contains(&subscription_id) {
        return document::not_found("Subscription", &subscription_id);
    }
    let period = store
        .subscriptions
        .get(&subscription_id)
        .and_then(|subscription| subscription.attr_str("subscriptionPeriod"))
        .map(str::to_string);

    if let Err(failure) = validate::offer_request(body, period.as_deref()) {
        return document::failure(&failure);
    }

    let duration = attr_str(body, "duration").unwrap_or("").to_string();
    let offer_mode = attr_str(body, "offerMode").unwrap_or("").to_string();
    let number_of_periods = attr_i64(body, "numberOfPeriods").unwrap_or(1);

    if let Err(failure) = validate::duration_for_period(&duration, period.as_deref().unwrap_or(""))
    {
        return document::failure(&failure);
    }

    let Some(territory_id) = rel_id(body, "territory").map(str::to_string) else {
        return ApiResponse::json(
            400,
            document::error(
                400,
                "MISSING_RELATIONSHIP",
                "Missing Relationship",
                "Territory is required",
            ),
        );
    };

    if let Err(failure) = validate::unique_offer_territory(store, &subscription_id, &territory_id)
    {
        return document::failure(&failure);
    }

    let price_point_id = match offer_mode.as_str() {
        "PAY_AS_YOU_GO" | "PAY_UP_FRONT" => {
            rel_id(body, "subscriptionPricePoint").map(str::to_string)
        }
        _ => None,
    };

    let offer_id = store.next_id("offer_");
    let offer = store.add_introductory_offer(
        &offer_id,
        &subscription_id,
        &territory_id,
        &offer_mode,
        &duration,
        number_of_periods,
        price_point_id.as_deref(),
    );
    ApiResponse::json(201, document::one(&offer))
}

/// DELETE /subscriptionIntroductoryOffers/{id}.
pub(crate) fn delete_offer(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let offer_id = request.param("offer_id");
    if store.delete_introductory_offer(offer_id) {
        ApiResponse::json(204, serde_json::Value::Null)
    } else {
        document::not_found("SubscriptionIntroductoryOffer", offer_id)
    }
}
