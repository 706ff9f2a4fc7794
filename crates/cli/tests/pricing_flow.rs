// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Price point listing, equalizations, and price scheduling.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{client_with_catalog, with_store};
use storefront_cli::api::ApiError;
use storefront_sim::fixtures;

const SUB: &str = "sub_app_123";

#[tokio::test]
async fn large_catalogs_paginate_transparently() {
    let (sim, client) = client_with_catalog(Some("ONE_MONTH"));
    with_store(&sim, |store| fixtures::seed_price_points(store, SUB, 250));

    let page = client.list_price_points(SUB, None, false).await.unwrap();
    assert_eq!(page.resources.len(), 250);

    // Insertion order survives pagination.
    assert_eq!(page.resources[0].id, format!("pp_{SUB}_0000"));
    assert_eq!(page.resources[249].id, format!("pp_{SUB}_0249"));
}

#[tokio::test]
async fn equalizations_cover_every_other_territory() {
    let (sim, client) = client_with_catalog(Some("ONE_MONTH"));
    with_store(&sim, |store| {
        fixtures::generate_price_points(store, SUB, Some(&["USA", "GBR", "JPN"]));
    });

    let base = format!("pp_{SUB}_USA_tier_5");
    let page = client.list_equalizations(&base).await.unwrap();

    // Every tier in GBR and JPN; nothing in USA, the base point included.
    assert_eq!(page.resources.len(), fixtures::USD_PRICE_TIERS.len() * 2);
    assert!(page
        .resources
        .iter()
        .all(|point| point.relationship_id("territory") != Some("USA")));
}

#[tokio::test]
async fn equalizations_of_an_unknown_point_are_not_found() {
    let (_sim, client) = client_with_catalog(Some("ONE_MONTH"));
    let error = client.list_equalizations("pp_missing").await.unwrap_err();
    match error {
        ApiError::Api { status, code, .. } => {
            assert_eq!(status, 404);
            assert_eq!(code, "NOT_FOUND");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn scheduling_a_price_references_an_existing_point() {
    let (sim, client) = client_with_catalog(Some("ONE_MONTH"));
    with_store(&sim, |store| {
        fixtures::generate_price_points(store, SUB, Some(&["USA"]));
    });

    let point_id = with_store(&sim, |store| {
        fixtures::find_price_point_by_usd(store, SUB, "9.99", "USA")
    })
    .unwrap();

    let price = client
        .create_price(SUB, &point_id, Some("2026-10-01"), true)
        .await
        .unwrap();
    assert_eq!(price.attr_str("startDate"), Some("2026-10-01"));
    assert_eq!(
        price.relationship_id("subscriptionPricePoint"),
        Some(point_id.as_str())
    );

    let prices = client.list_prices(SUB).await.unwrap();
    assert_eq!(prices.len(), 1);
}

#[tokio::test]
async fn scheduling_against_a_missing_point_fails_cleanly() {
    let (_sim, client) = client_with_catalog(Some("ONE_MONTH"));
    let error = client
        .create_price(SUB, "pp_missing", None, false)
        .await
        .unwrap_err();
    match error {
        ApiError::Api { status, detail, .. } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "SubscriptionPricePoint with id 'pp_missing' not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
