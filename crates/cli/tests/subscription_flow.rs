// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subscription setup workflows driven through the client: billing period
//! immutability and introductory offer rules.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::client_with_catalog;
use storefront_cli::api::{ApiError, OfferParams};

const SUB: &str = "sub_app_123";

fn free_trial<'a>(territory: &'a str, duration: &'a str) -> OfferParams<'a> {
    OfferParams {
        subscription_id: SUB,
        territory_id: territory,
        offer_mode: "FREE_TRIAL",
        duration,
        number_of_periods: 1,
        price_point_id: None,
    }
}

#[tokio::test]
async fn period_set_is_idempotent_but_immutable() {
    let (_sim, client) = client_with_catalog(None);

    let subscription = client.set_subscription_period(SUB, "ONE_MONTH").await.unwrap();
    assert_eq!(subscription.attr_str("subscriptionPeriod"), Some("ONE_MONTH"));

    // Setting the same value again is a no-op.
    let again = client.set_subscription_period(SUB, "ONE_MONTH").await.unwrap();
    assert_eq!(again.attr_str("subscriptionPeriod"), Some("ONE_MONTH"));

    // A different value conflicts.
    let error = client.set_subscription_period(SUB, "ONE_YEAR").await.unwrap_err();
    match error {
        ApiError::Api { status, code, detail } => {
            assert_eq!(status, 409);
            assert_eq!(code, "ENTITY_ERROR.ATTRIBUTE.INVALID");
            assert_eq!(
                detail,
                "Subscription period cannot be changed once set. \
                 Current: ONE_MONTH, Requested: ONE_YEAR"
            );
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn period_outside_the_enum_is_rejected() {
    let (_sim, client) = client_with_catalog(None);
    let error = client.set_subscription_period(SUB, "FORTNIGHTLY").await.unwrap_err();
    match error {
        ApiError::Api { status, code, .. } => {
            assert_eq!(status, 400);
            assert_eq!(code, "INVALID_ATTRIBUTE");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn offers_need_a_billing_period_first() {
    let (_sim, client) = client_with_catalog(None);
    let error = client.create_offer(&free_trial("USA", "ONE_WEEK")).await.unwrap_err();
    match error {
        ApiError::Api { status, detail, .. } => {
            assert_eq!(status, 409);
            assert_eq!(detail, "Subscription duration must be set before creating offers");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn offer_duration_must_fit_the_billing_period() {
    let (_sim, client) = client_with_catalog(Some("ONE_WEEK"));

    let error = client.create_offer(&free_trial("USA", "ONE_MONTH")).await.unwrap_err();
    match error {
        ApiError::Api { status, code, detail } => {
            assert_eq!(status, 400);
            assert_eq!(code, "INVALID_ATTRIBUTE");
            assert_eq!(
                detail,
                "Duration 'ONE_MONTH' is not valid for subscription period 'ONE_WEEK'. \
                 Valid durations: THREE_DAYS"
            );
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    let offer = client.create_offer(&free_trial("USA", "THREE_DAYS")).await.unwrap();
    assert_eq!(offer.attr_str("duration"), Some("THREE_DAYS"));
}

#[tokio::test]
async fn one_offer_per_territory() {
    let (_sim, client) = client_with_catalog(Some("ONE_MONTH"));

    client.create_offer(&free_trial("USA", "ONE_WEEK")).await.unwrap();

    let error = client.create_offer(&free_trial("USA", "ONE_WEEK")).await.unwrap_err();
    match error {
        ApiError::Api { status, code, detail } => {
            assert_eq!(status, 409);
            assert_eq!(code, "ENTITY_ERROR.RELATIONSHIP.INVALID");
            assert_eq!(
                detail,
                "An introductory offer already exists for territory USA. \
                 Only one offer per territory is allowed at a time."
            );
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    // Another territory is fine.
    client.create_offer(&free_trial("GBR", "ONE_WEEK")).await.unwrap();
    assert_eq!(client.list_offers(SUB).await.unwrap().len(), 2);
}

#[tokio::test]
async fn deleting_an_offer_frees_the_territory() {
    let (_sim, client) = client_with_catalog(Some("ONE_MONTH"));

    let offer = client.create_offer(&free_trial("USA", "ONE_WEEK")).await.unwrap();
    client.delete_offer(&offer.id).await.unwrap();
    assert!(client.list_offers(SUB).await.unwrap().is_empty());

    // The territory can take a new offer.
    client.create_offer(&free_trial("USA", "TWO_WEEKS")).await.unwrap();
}

#[tokio::test]
async fn paid_offers_require_a_price_point() {
    let (_sim, client) = client_with_catalog(Some("ONE_MONTH"));

    let params = OfferParams {
        subscription_id: SUB,
        territory_id: "USA",
        offer_mode: "PAY_AS_YOU_GO",
        duration: "ONE_MONTH",
        number_of_periods: 3,
        price_point_id: None,
    };
    let error = client.create_offer(&params).await.unwrap_err();
    match error {
        ApiError::Api { status, code, detail } => {
            assert_eq!(status, 400);
            assert_eq!(code, "MISSING_RELATIONSHIP");
            assert_eq!(detail, "subscriptionPricePoint is required for paid offers");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
