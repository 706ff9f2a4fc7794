// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture loaders: canned territory and price-tier data plus helpers for
//! populating a store before a test.

use crate::store::EntityStore;

/// Three-letter territory codes with their currencies. A subset of the
/// production territory list, large enough for equalization tests.
pub const TERRITORIES: &[(&str, &str)] = &[
    // North America
    ("USA", "USD"),
    ("CAN", "CAD"),
    ("MEX", "MXN"),
    // Europe
    ("GBR", "GBP"),
    ("DEU", "EUR"),
    ("FRA", "EUR"),
    ("ITA", "EUR"),
    ("ESP", "EUR"),
    ("NLD", "EUR"),
    ("BEL", "EUR"),
    ("AUT", "EUR"),
    ("IRL", "EUR"),
    ("PRT", "EUR"),
    ("FIN", "EUR"),
    ("GRC", "EUR"),
    ("CHE", "CHF"),
    ("SWE", "SEK"),
    ("NOR", "NOK"),
    ("DNK", "DKK"),
    ("POL", "PLN"),
    ("CZE", "CZK"),
    ("HUN", "HUF"),
    ("ROU", "RON"),
    // Asia Pacific
    ("JPN", "JPY"),
    ("CHN", "CNY"),
    ("KOR", "KRW"),
    ("TWN", "TWD"),
    ("HKG", "HKD"),
    ("SGP", "SGD"),
    ("MYS", "MYR"),
    ("THA", "THB"),
    ("IDN", "IDR"),
    ("PHL", "PHP"),
    ("VNM", "VND"),
    ("IND", "INR"),
    ("AUS", "AUD"),
    ("NZL", "NZD"),
    // Middle East
    ("SAU", "SAR"),
    ("ARE", "AED"),
    ("ISR", "ILS"),
    ("TUR", "TRY"),
    // South America
    ("BRA", "BRL"),
    ("ARG", "ARS"),
    ("CHL", "CLP"),
    ("COL", "COP"),
    ("PER", "PEN"),
    // Africa
    ("ZAF", "ZAR"),
    ("EGY", "EGP"),
    ("NGA", "NGN"),
    // Russia
    ("RUS", "RUB"),
];

/// USD price tiers as (customer price, tier id).
pub const USD_PRICE_TIERS: &[(&str, &str)] = &[
    ("0.00", "tier_free"),
    ("0.99", "tier_1"),
    ("1.99", "tier_2"),
    ("2.99", "tier_3"),
    ("3.99", "tier_4"),
    ("4.99", "tier_5"),
    ("5.99", "tier_6"),
    ("6.99", "tier_7"),
    ("7.99", "tier_8"),
    ("8.99", "tier_9"),
    ("9.99", "tier_10"),
    ("10.99", "tier_11"),
    ("11.99", "tier_12"),
    ("12.99", "tier_13"),
    ("13.99", "tier_14"),
    ("14.99", "tier_15"),
    ("19.99", "tier_20"),
    ("24.99", "tier_25"),
    ("29.99", "tier_30"),
    ("39.99", "tier_40"),
    ("49.99", "tier_50"),
    ("59.99", "tier_60"),
    ("69.99", "tier_70"),
    ("79.99", "tier_80"),
    ("89.99", "tier_90"),
    ("99.99", "tier_100"),
];

/// Simplified USD-to-local equalization rate per territory. Territories
/// without a listed rate equalize 1:1.
fn equalization_rate(territory: &str) -> f64 {
    match territory {
        "USA" => 1.00,
        "CAN" => 1.35,
        "GBR" => 0.79,
        // Euro territories share a rate.
        "DEU" | "FRA" | "ITA" | "ESP" | "NLD" | "BEL" | "AUT" | "IRL" | "PRT" | "FIN" | "GRC" => {
            0.95
        }
        "AUS" => 1.55,
        "NZL" => 1.65,
        "JPN" => 150.0,
        "CHN" => 7.20,
        "KOR" => 1350.0,
        "HKG" => 7.85,
        "SGP" => 1.35,
        "IND" => 83.0,
        "BRA" => 5.0,
        "MEX" => 17.5,
        "CHE" => 0.88,
        "SWE" => 10.5,
        "NOR" => 10.8,
        "DNK" => 7.0,
        "POL" => 4.0,
        "ZAF" => 19.0,
        "TUR" => 30.0,
        "RUS" => 90.0,
        _ => 1.0,
    }
}

/// Developer proceeds: 70% of the customer price, rounded to cents.
fn proceeds(customer_price: f64) -> f64 {
    (customer_price * 0.70 * 100.0).round() / 100.0
}

/// Load the full territory table into a store.
pub fn load_territories(store: &mut EntityStore) {
    for (code, currency) in TERRITORIES {
        store.add_territory(code, currency);
    }
}

/// Ids of the resources created by [`standard_catalog`].
pub struct StandardCatalog {
    pub app_id: String,
    pub group_id: String,
    pub subscription_id: String,
}

/// One app with a subscription group, a subscription (billing period as
/// given), and an English localization.
pub fn standard_catalog(store: &mut EntityStore, period: Option<&str>) -> StandardCatalog {
    let app_id = "app_123";
    let bundle_id = "com.example.test";
    store.add_app(app_id, bundle_id, "Test App");

    let group_id = format!("group_{app_id}");
    store.add_subscription_group(&group_id, app_id, "Premium");

    let subscription_id = format!("sub_{app_id}");
    store.add_subscription(
        &subscription_id,
        &group_id,
        &format!("{bundle_id}.premium.monthly"),
        "Premium Monthly",
        period,
    );

    store.add_subscription_localization(
        &format!("loc_{subscription_id}_en"),
        &subscription_id,
        "en-US",
        "Premium Monthly",
        Some("Access all premium features with a monthly subscription."),
    );

    StandardCatalog {
        app_id: app_id.to_string(),
        group_id,
        subscription_id,
    }
}

/// Price points for every tier in every given territory (all territories in
/// the store when `territories` is `None`), at equalized local prices. Ids
/// follow `pp_{subscription}_{territory}_{tier}`.
pub fn generate_price_points(
    store: &mut EntityStore,
    subscription_id: &str,
    territories: Option<&[&str]>,
) {
    let territories: Vec<String> = match territories {
        Some(codes) => codes.iter().map(|c| (*c).to_string()).collect(),
        None => store.territories.values().map(|t| t.id.clone()).collect(),
    };

    for (usd_price, tier_id) in USD_PRICE_TIERS {
        let usd: f64 = usd_price.parse().unwrap_or(0.0);
        for territory_id in &territories {
            let local = (usd * equalization_rate(territory_id) * 100.0).round() / 100.0;
            store.add_price_point(
                &format!("pp_{subscription_id}_{territory_id}_{tier_id}"),
                subscription_id,
                territory_id,
                &format!("{local:.2}"),
                &format!("{:.2}", proceeds(local)),
            );
        }
    }
}

/// A flat run of `count` USA price points, for pagination tests that only
/// care about volume.
pub fn seed_price_points(store: &mut EntityStore, subscription_id: &str, count: usize) {
    for n in 0..count {
        let price = (n + 1) as f64;
        store.add_price_point(
            &format!("pp_{subscription_id}_{n:04}"),
            subscription_id,
            "USA",
            &format!("{price:.2}"),
            &format!("{:.2}", proceeds(price)),
        );
    }
}

/// Resolve a USD tier price to the generated price point id, if present.
pub fn find_price_point_by_usd(
    store: &EntityStore,
    subscription_id: &str,
    usd_price: &str,
    territory_id: &str,
) -> Option<String> {
    let (_, tier_id) = USD_PRICE_TIERS
        .iter()
        .find(|(price, _)| *price == usd_price)?;
    let price_point_id = format!("pp_{subscription_id}_{territory_id}_{tier_id}");
    store
        .subscription_price_points
        .contains(&price_point_id)
        .then_some(price_point_id)
}

#[cfg(test)]
#[path = "fixtures_tests.rs"]
mod tests;
