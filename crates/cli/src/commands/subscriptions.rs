// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::api::{OfferParams, StorefrontClient};
use crate::cli::{OutputMode, SubscriptionsCommand};
use crate::commands::CliError;
use crate::output::{print_resource, print_resources};

pub(crate) async fn run(
    client: &StorefrontClient,
    command: SubscriptionsCommand,
    output: OutputMode,
) -> Result<(), CliError> {
    match command {
        SubscriptionsCommand::Groups { app } => {
            let groups = client.list_subscription_groups(&app).await?;
            print_resources(output, &groups, &["referenceName"]);
        }
        SubscriptionsCommand::List { group } => {
            let subscriptions = client.list_subscriptions(&group).await?;
            print_resources(
                output,
                &subscriptions,
                &["productId", "name", "subscriptionPeriod", "state"],
            );
        }
        SubscriptionsCommand::Show { subscription_id } => {
            let subscription = client.get_subscription(&subscription_id).await?;
            print_resource(output, &subscription);
        }
        SubscriptionsCommand::SetPeriod {
            subscription_id,
            period,
        } => {
            let subscription = client
                .set_subscription_period(&subscription_id, &period)
                .await?;
            print_resource(output, &subscription);
        }
        SubscriptionsCommand::Localizations { subscription_id } => {
            let localizations = client.list_localizations(&subscription_id).await?;
            print_resources(output, &localizations, &["locale", "name"]);
        }
        SubscriptionsCommand::PricePoints {
            subscription_id,
            territory,
        } => {
            let page = client
                .list_price_points(&subscription_id, territory.as_deref(), false)
                .await?;
            print_resources(output, &page.resources, &["customerPrice", "proceeds"]);
        }
        SubscriptionsCommand::Equalizations { price_point_id } => {
            let page = client.list_equalizations(&price_point_id).await?;
            print_resources(output, &page.resources, &["customerPrice", "proceeds"]);
        }
        SubscriptionsCommand::Prices { subscription_id } => {
            let prices = client.list_prices(&subscription_id).await?;
            print_resources(output, &prices, &["startDate", "preserved"]);
        }
        SubscriptionsCommand::SetPrice {
            subscription_id,
            price_point,
            start_date,
            preserve_current,
        } => {
            let price = client
                .create_price(
                    &subscription_id,
                    &price_point,
                    start_date.as_deref(),
                    preserve_current,
                )
                .await?;
            print_resource(output, &price);
        }
        SubscriptionsCommand::Offers { subscription_id } => {
            let offers = client.list_offers(&subscription_id).await?;
            print_resources(
                output,
                &offers,
                &["offerMode", "duration", "numberOfPeriods"],
            );
        }
        SubscriptionsCommand::CreateOffer {
            subscription_id,
            territory,
            mode,
            duration,
            periods,
            price_point,
        } => {
            let offer = client
                .create_offer(&OfferParams {
                    subscription_id: &subscription_id,
                    territory_id: &territory,
                    offer_mode: &mode,
                    duration: &duration,
                    number_of_periods: periods,
                    price_point_id: price_point.as_deref(),
                })
                .await?;
            print_resource(output, &offer);
        }
        SubscriptionsCommand::DeleteOffer { offer_id } => {
            client.delete_offer(&offer_id).await?;
            println!("deleted {offer_id}");
        }
        SubscriptionsCommand::Availability { subscription_id } => {
            match client.get_availability(&subscription_id, false).await? {
                Some(availability) => {
                    print_resource(output, &availability);
                    let territories = availability.relationship_ids("availableTerritories");
                    if !territories.is_empty() {
                        println!("territories: {}", territories.join(", "));
                    }
                }
                None => println!("(no availability configured)"),
            }
        }
        SubscriptionsCommand::SetAvailability {
            subscription_id,
            territories,
        } => {
            let availability = client
                .set_availability(&subscription_id, &territories)
                .await?;
            print_resource(output, &availability);
        }
    }
    Ok(())
}
