// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use serde_json::json;
use storefront_protocol::{ApiRequest, BASE_URL};

use super::*;
use crate::fixtures;

fn seeded() -> Simulator {
    let sim = Simulator::new();
    sim.store(|store| {
        fixtures::load_territories(store);
        fixtures::standard_catalog(store, Some("ONE_MONTH"));
    });
    sim
}

#[test]
fn every_route_pattern_compiles() {
    let sim = Simulator::new();
    assert_eq!(sim.routes.len(), routes::table().len());
}

#[test]
fn unmatched_path_answers_not_found() {
    let sim = Simulator::new();
    let response = sim.handle(&ApiRequest::get("/no/such/endpoint"));
    assert_eq!(response.status, 404);
    assert_eq!(response.body["errors"][0]["code"], "NOT_FOUND");
    assert_eq!(
        response.body["errors"][0]["detail"],
        "No route matches GET /no/such/endpoint"
    );
}

#[test]
fn dispatch_extracts_path_params() {
    let sim = seeded();
    let response = sim.handle(&ApiRequest::get("/apps/app_123"));
    assert_eq!(response.status, 200);
    assert_eq!(response.body["data"]["id"], "app_123");
    assert_eq!(response.body["data"]["type"], "apps");
}

#[test]
fn absolute_and_relative_urls_dispatch_identically() {
    let sim = seeded();
    let relative = sim.handle(&ApiRequest::get("/apps/app_123"));
    let absolute = sim.handle(&ApiRequest::get(format!("{BASE_URL}/apps/app_123")));
    assert_eq!(relative.status, absolute.status);
    assert_eq!(relative.body, absolute.body);
}

#[test]
fn rate_limit_fires_once_then_clears() {
    let sim = seeded();
    sim.simulate_rate_limit();

    let limited = sim.handle(&ApiRequest::get("/apps"));
    assert_eq!(limited.status, 429);
    assert_eq!(limited.header("Retry-After"), Some("60"));
    assert_eq!(limited.body["errors"][0]["code"], "RATE_LIMIT_EXCEEDED");
    assert_eq!(
        limited.body["errors"][0]["detail"],
        "Too many requests. Please retry after 60 seconds."
    );

    let normal = sim.handle(&ApiRequest::get("/apps"));
    assert_eq!(normal.status, 200);
}

#[test]
fn armed_rate_limit_beats_error_overrides() {
    let sim = seeded();
    sim.simulate_error("^/apps", 500, "SERVER_ERROR", "boom").unwrap();
    sim.simulate_rate_limit();

    let first = sim.handle(&ApiRequest::get("/apps"));
    assert_eq!(first.status, 429);

    let second = sim.handle(&ApiRequest::get("/apps"));
    assert_eq!(second.status, 500);
}

#[test]
fn error_override_short_circuits_matching_paths() {
    let sim = seeded();
    sim.simulate_error("^/subscriptions/", 503, "SERVICE_UNAVAILABLE", "maintenance window")
        .unwrap();

    let forced = sim.handle(&ApiRequest::get("/subscriptions/sub_app_123"));
    assert_eq!(forced.status, 503);
    assert_eq!(forced.body["errors"][0]["code"], "SERVICE_UNAVAILABLE");
    assert_eq!(forced.body["errors"][0]["title"], "SERVICE_UNAVAILABLE");
    assert_eq!(forced.body["errors"][0]["detail"], "maintenance window");

    // Non-matching paths dispatch normally.
    let untouched = sim.handle(&ApiRequest::get("/apps/app_123"));
    assert_eq!(untouched.status, 200);

    sim.clear_error_overrides();
    let restored = sim.handle(&ApiRequest::get("/subscriptions/sub_app_123"));
    assert_eq!(restored.status, 200);
}

#[test]
fn invalid_override_pattern_is_rejected() {
    let sim = Simulator::new();
    assert!(sim.simulate_error("[unclosed", 500, "SERVER_ERROR", "x").is_err());
}

#[test]
fn reset_clears_store_but_keeps_overrides() {
    let sim = seeded();
    sim.simulate_error("^/territories$", 500, "SERVER_ERROR", "down").unwrap();
    sim.reset();

    // Seeded app is gone.
    let app = sim.handle(&ApiRequest::get("/apps/app_123"));
    assert_eq!(app.status, 404);

    // The override still fires.
    let forced = sim.handle(&ApiRequest::get("/territories"));
    assert_eq!(forced.status, 500);
}

#[test]
fn reset_disarms_pending_rate_limit() {
    let sim = seeded();
    sim.simulate_rate_limit();
    sim.reset();
    let response = sim.handle(&ApiRequest::get("/territories"));
    assert_ne!(response.status, 429);
}

#[test]
fn period_update_conflicts_once_set() {
    let sim = seeded();
    let body = json!({
        "data": {
            "type": "subscriptions",
            "id": "sub_app_123",
            "attributes": { "subscriptionPeriod": "ONE_YEAR" }
        }
    });
    let response = sim.handle(&ApiRequest::patch("/subscriptions/sub_app_123", body));
    assert_eq!(response.status, 409);
    assert_eq!(
        response.body["errors"][0]["detail"],
        "Subscription period cannot be changed once set. Current: ONE_MONTH, Requested: ONE_YEAR"
    );
}

#[test]
fn offer_lifecycle_through_the_dispatcher() {
    let sim = seeded();
    let body = json!({
        "data": {
            "type": "subscriptionIntroductoryOffers",
            "attributes": { "offerMode": "FREE_TRIAL", "duration": "ONE_WEEK", "numberOfPeriods": 1 },
            "relationships": {
                "subscription": { "data": { "type": "subscriptions", "id": "sub_app_123" } },
                "territory": { "data": { "type": "territories", "id": "USA" } }
            }
        }
    });

    let created = sim.handle(&ApiRequest::post("/subscriptionIntroductoryOffers", body.clone()));
    assert_eq!(created.status, 201);
    let offer_id = created.body["data"]["id"].as_str().unwrap().to_string();

    let duplicate = sim.handle(&ApiRequest::post("/subscriptionIntroductoryOffers", body));
    assert_eq!(duplicate.status, 409);

    let listed = sim.handle(&ApiRequest::get("/subscriptions/sub_app_123/introductoryOffers"));
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);

    let deleted = sim.handle(&ApiRequest::delete(
        format!("/subscriptionIntroductoryOffers/{offer_id}"),
        None,
    ));
    assert_eq!(deleted.status, 204);
    assert!(deleted.body.is_null());

    let relisted = sim.handle(&ApiRequest::get("/subscriptions/sub_app_123/introductoryOffers"));
    assert!(relisted.body["data"].as_array().unwrap().is_empty());
}

#[test]
fn pagination_next_link_is_followable() {
    let sim = seeded();
    sim.store(|store| fixtures::seed_price_points(store, "sub_app_123", 250));

    let first = sim.handle(&ApiRequest::get("/subscriptions/sub_app_123/pricePoints"));
    assert_eq!(first.status, 200);
    assert_eq!(first.body["data"].as_array().unwrap().len(), 200);
    let next = first.body["links"]["next"].as_str().unwrap().to_string();
    assert!(next.starts_with(BASE_URL));

    let second = sim.handle(&ApiRequest::get(next));
    assert_eq!(second.status, 200);
    assert_eq!(second.body["data"].as_array().unwrap().len(), 50);
    assert!(second.body["links"]["next"].is_null());
}

#[tokio::test]
async fn transport_impl_always_answers() {
    let sim = seeded();
    let response = sim.send(ApiRequest::get("/territories")).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(
        response.body["data"].as_array().unwrap().len(),
        fixtures::TERRITORIES.len()
    );
}
