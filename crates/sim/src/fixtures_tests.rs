// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn load_territories_covers_the_table() {
    let mut store = EntityStore::new();
    load_territories(&mut store);
    assert_eq!(store.territories.len(), TERRITORIES.len());
    let usa = store.territories.get("USA").unwrap();
    assert_eq!(usa.attr_str("currency"), Some("USD"));
}

#[test]
fn standard_catalog_wires_app_group_and_subscription() {
    let mut store = EntityStore::new();
    let catalog = standard_catalog(&mut store, Some("ONE_MONTH"));

    assert_eq!(catalog.app_id, "app_123");
    let subscription = store.subscriptions.get(&catalog.subscription_id).unwrap();
    assert_eq!(subscription.attr_str("subscriptionPeriod"), Some("ONE_MONTH"));
    assert_eq!(
        store.group_subscriptions.get(&catalog.group_id),
        Some(&vec![catalog.subscription_id.clone()])
    );
    assert_eq!(
        store
            .localizations_by_subscription
            .get(&catalog.subscription_id)
            .map(Vec::len),
        Some(1)
    );
}

#[test]
fn generated_price_points_equalize_and_take_a_cut() {
    let mut store = EntityStore::new();
    load_territories(&mut store);
    let catalog = standard_catalog(&mut store, Some("ONE_MONTH"));
    generate_price_points(&mut store, &catalog.subscription_id, Some(&["USA", "JPN"]));

    assert_eq!(
        store.subscription_price_points.len(),
        USD_PRICE_TIERS.len() * 2
    );

    let usa = store
        .subscription_price_points
        .get(&format!("pp_{}_USA_tier_5", catalog.subscription_id))
        .unwrap();
    assert_eq!(usa.attr_str("customerPrice"), Some("4.99"));
    assert_eq!(usa.attr_str("proceeds"), Some("3.49"));

    // 4.99 USD at 150 JPY/USD.
    let jpn = store
        .subscription_price_points
        .get(&format!("pp_{}_JPN_tier_5", catalog.subscription_id))
        .unwrap();
    assert_eq!(jpn.attr_str("customerPrice"), Some("748.50"));
}

#[test]
fn find_price_point_resolves_generated_ids() {
    let mut store = EntityStore::new();
    load_territories(&mut store);
    let catalog = standard_catalog(&mut store, Some("ONE_MONTH"));
    generate_price_points(&mut store, &catalog.subscription_id, Some(&["USA"]));

    assert_eq!(
        find_price_point_by_usd(&store, &catalog.subscription_id, "9.99", "USA").as_deref(),
        Some("pp_sub_app_123_USA_tier_10")
    );
    assert!(find_price_point_by_usd(&store, &catalog.subscription_id, "9.99", "GBR").is_none());
    assert!(find_price_point_by_usd(&store, &catalog.subscription_id, "5.55", "USA").is_none());
}

#[test]
fn seed_price_points_is_bulk_and_ordered() {
    let mut store = EntityStore::new();
    let catalog = standard_catalog(&mut store, None);
    seed_price_points(&mut store, &catalog.subscription_id, 250);

    assert_eq!(store.subscription_price_points.len(), 250);
    assert_eq!(
        store
            .price_points_by_subscription
            .get(&catalog.subscription_id)
            .map(Vec::len),
        Some(250)
    );
}
