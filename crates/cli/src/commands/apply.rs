// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative bulk apply: reconcile an app's subscriptions with a TOML
//! description. Already-matching state is skipped, so applying the same
//! file twice performs no writes the second time.

use std::collections::HashSet;
use std::path::Path;

use storefront_protocol::Resource;

use crate::api::{OfferParams, StorefrontClient};
use crate::cli::ApplyArgs;
use crate::commands::CliError;
use crate::config::{ApplyConfig, OfferConfig, PriceConfig, SubscriptionConfig};

pub(crate) async fn run(client: &StorefrontClient, args: ApplyArgs) -> Result<(), CliError> {
    let config = ApplyConfig::load(Path::new(&args.file))?;

    // Index the app's existing subscriptions by product id.
    let mut by_product: Vec<Resource> = Vec::new();
    for group in client.list_subscription_groups(&args.app).await? {
        by_product.extend(client.list_subscriptions(&group.id).await?);
    }

    for desired in &config.subscriptions {
        let Some(subscription) = by_product
            .iter()
            .find(|s| s.attr_str("productId") == Some(desired.product_id.as_str()))
        else {
            return Err(CliError::Invalid(format!(
                "no subscription with product id '{}' in app {}",
                desired.product_id, args.app
            )));
        };
        apply_subscription(client, subscription, desired).await?;
    }
    Ok(())
}

async fn apply_subscription(
    client: &StorefrontClient,
    subscription: &Resource,
    desired: &SubscriptionConfig,
) -> Result<(), CliError> {
    let subscription_id = subscription.id.as_str();
    println!("{}:", desired.product_id);

    if let Some(period) = &desired.period {
        if subscription.attr_str("subscriptionPeriod") == Some(period.as_str()) {
            println!("  period {period} (unchanged)");
        } else {
            client
                .set_subscription_period(subscription_id, period)
                .await?;
            println!("  period {period}");
        }
    }

    if !desired.prices.is_empty() {
        let existing: HashSet<String> = client
            .list_prices(subscription_id)
            .await?
            .iter()
            .filter_map(|price| price.relationship_id("subscriptionPricePoint"))
            .map(str::to_string)
            .collect();
        for price in &desired.prices {
            apply_price(client, subscription_id, price, &existing).await?;
        }
    }

    if !desired.offers.is_empty() {
        let taken: HashSet<String> = client
            .list_offers(subscription_id)
            .await?
            .iter()
            .filter_map(|offer| offer.relationship_id("territory"))
            .map(str::to_string)
            .collect();
        for offer in &desired.offers {
            apply_offer(client, subscription_id, offer, &taken).await?;
        }
    }

    if !desired.availability.is_empty() {
        let wanted: HashSet<&str> = desired.availability.iter().map(String::as_str).collect();
        let current: HashSet<String> = match client.get_availability(subscription_id, false).await? {
            Some(availability) => availability
                .relationship_ids("availableTerritories")
                .into_iter()
                .map(str::to_string)
                .collect(),
            None => HashSet::new(),
        };
        let current_refs: HashSet<&str> = current.iter().map(String::as_str).collect();
        if current_refs == wanted {
            println!("  availability unchanged ({} territories)", wanted.len());
        } else {
            client
                .set_availability(subscription_id, &desired.availability)
                .await?;
            println!("  availability set ({} territories)", wanted.len());
        }
    }

    Ok(())
}

async fn apply_price(
    client: &StorefrontClient,
    subscription_id: &str,
    price: &PriceConfig,
    existing: &HashSet<String>,
) -> Result<(), CliError> {
    let point_id = resolve_price_point(client, subscription_id, &price.territory, &price.price)
        .await?;
    if existing.contains(&point_id) {
        println!("  price {} {} (unchanged)", price.territory, price.price);
        return Ok(());
    }
    client
        .create_price(
            subscription_id,
            &point_id,
            price.start_date.as_deref(),
            price.preserve_current,
        )
        .await?;
    println!("  price {} {}", price.territory, price.price);
    Ok(())
}

async fn apply_offer(
    client: &StorefrontClient,
    subscription_id: &str,
    offer: &OfferConfig,
    taken: &HashSet<String>,
) -> Result<(), CliError> {
    if taken.contains(&offer.territory) {
        println!("  offer {} (unchanged)", offer.territory);
        return Ok(());
    }
    let price_point_id = match &offer.price {
        Some(price) => {
            Some(resolve_price_point(client, subscription_id, &offer.territory, price).await?)
        }
        None => None,
    };
    client
        .create_offer(&OfferParams {
            subscription_id,
            territory_id: &offer.territory,
            offer_mode: &offer.mode,
            duration: &offer.duration,
            number_of_periods: offer.number_of_periods,
            price_point_id: price_point_id.as_deref(),
        })
        .await?;
    println!("  offer {} {} {}", offer.territory, offer.mode, offer.duration);
    Ok(())
}

/// Match a configured customer price to an existing price point in the
/// territory.
async fn resolve_price_point(
    client: &StorefrontClient,
    subscription_id: &str,
    territory: &str,
    price: &str,
) -> Result<String, CliError> {
    let page = client
        .list_price_points(subscription_id, Some(territory), false)
        .await?;
    page.resources
        .iter()
        .find(|point| point.attr_str("customerPrice") == Some(price))
        .map(|point| point.id.clone())
        .ok_or_else(|| {
            CliError::Invalid(format!(
                "no price point at {price} in {territory} for {subscription_id}"
            ))
        })
}
