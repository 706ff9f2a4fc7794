// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request validation rules.
//!
//! Each function inspects an inbound request document (plus whatever store
//! context the rule needs) and either returns silently or produces a
//! [`ValidationError`] carrying the status, code, and detail the handler
//! must answer with. Rule order is part of the contract: callers' branch
//! logic depends on which failure fires first.

use serde_json::Value;
use storefront_protocol::{attr, data_type, has_rel};
use thiserror::Error;

use crate::store::EntityStore;

/// A request rejected by a validation rule.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{code}: {detail}")]
pub struct ValidationError {
    pub status: u16,
    pub code: String,
    pub detail: String,
}

impl ValidationError {
    fn new(status: u16, code: &str, detail: impl Into<String>) -> Self {
        Self {
            status,
            code: code.to_string(),
            detail: detail.into(),
        }
    }
}

pub(crate) const OFFER_MODES: &[&str] = &["FREE_TRIAL", "PAY_AS_YOU_GO", "PAY_UP_FRONT"];

pub(crate) const OFFER_DURATIONS: &[&str] = &[
    "THREE_DAYS",
    "ONE_WEEK",
    "TWO_WEEKS",
    "ONE_MONTH",
    "TWO_MONTHS",
    "THREE_MONTHS",
    "SIX_MONTHS",
    "ONE_YEAR",
];

pub(crate) const BILLING_PERIODS: &[&str] = &[
    "ONE_WEEK",
    "ONE_MONTH",
    "TWO_MONTHS",
    "THREE_MONTHS",
    "SIX_MONTHS",
    "ONE_YEAR",
];

/// Offer durations allowed for a given billing period. Fixed table from the
/// backend documentation; empty for unknown periods.
pub(crate) fn allowed_durations(period: &str) -> &'static [&'static str] {
    match period {
        "ONE_WEEK" => &["THREE_DAYS"],
        "ONE_MONTH" => &["ONE_WEEK", "TWO_WEEKS", "ONE_MONTH", "TWO_MONTHS", "THREE_MONTHS"],
        "TWO_MONTHS" => &["ONE_MONTH", "TWO_MONTHS", "THREE_MONTHS", "SIX_MONTHS"],
        "THREE_MONTHS" => &["ONE_MONTH", "TWO_MONTHS", "THREE_MONTHS", "SIX_MONTHS"],
        "SIX_MONTHS" => &["ONE_MONTH", "THREE_MONTHS", "SIX_MONTHS"],
        "ONE_YEAR" => &[
            "ONE_WEEK",
            "ONE_MONTH",
            "TWO_MONTHS",
            "THREE_MONTHS",
            "SIX_MONTHS",
            "ONE_YEAR",
        ],
        _ => &[],
    }
}

/// Structural check: `data` must be an object and `data.type` must match.
pub(crate) fn document(body: &Value, expected_type: &str) -> Result<(), ValidationError> {
    if body.get("data").is_none() {
        return Err(ValidationError::new(400, "INVALID_REQUEST", "Missing 'data' field"));
    }
    let actual = data_type(body).unwrap_or("");
    if actual != expected_type {
        return Err(ValidationError::new(
            400,
            "INVALID_TYPE",
            format!("Expected type '{expected_type}', got '{actual}'"),
        ));
    }
    Ok(())
}

fn require_relationship(body: &Value, name: &str) -> Result<(), ValidationError> {
    if has_rel(body, name) {
        return Ok(());
    }
    Err(ValidationError::new(
        400,
        "MISSING_RELATIONSHIP",
        format!("Missing required relationship: {name}"),
    ))
}

/// Price creation: `subscription` and `subscriptionPricePoint` required.
pub(crate) fn price_request(body: &Value) -> Result<(), ValidationError> {
    document(body, "subscriptionPrices")?;
    require_relationship(body, "subscription")?;
    require_relationship(body, "subscriptionPricePoint")
}

/// Availability: `subscription` and `availableTerritories` required.
pub(crate) fn availability_request(body: &Value) -> Result<(), ValidationError> {
    document(body, "subscriptionAvailabilities")?;
    require_relationship(body, "subscription")?;
    require_relationship(body, "availableTerritories")
}

/// Offer creation, everything short of store lookups.
///
/// `period` is the target subscription's current billing period; a
/// subscription with no period cannot take offers at all (409 before the
/// relationship checks run, so retry logic can distinguish the two).
pub(crate) fn offer_request(body: &Value, period: Option<&str>) -> Result<(), ValidationError> {
    document(body, "subscriptionIntroductoryOffers")?;

    for field in ["duration", "offerMode", "numberOfPeriods"] {
        if attr(body, field).is_none() {
            return Err(ValidationError::new(
                400,
                "MISSING_ATTRIBUTE",
                format!("Missing required attribute: {field}"),
            ));
        }
    }

    if period.is_none() {
        return Err(ValidationError::new(
            409,
            "ENTITY_ERROR.RELATIONSHIP.INVALID",
            "Subscription duration must be set before creating offers",
        ));
    }

    require_relationship(body, "subscription")?;
    require_relationship(body, "territory")?;

    let mode = attr(body, "offerMode").and_then(Value::as_str).unwrap_or("");
    if !OFFER_MODES.contains(&mode) {
        return Err(ValidationError::new(
            400,
            "INVALID_ATTRIBUTE",
            format!("Invalid offerMode. Must be one of: {}", OFFER_MODES.join(", ")),
        ));
    }

    let duration = attr(body, "duration").and_then(Value::as_str).unwrap_or("");
    if !OFFER_DURATIONS.contains(&duration) {
        return Err(ValidationError::new(
            400,
            "INVALID_ATTRIBUTE",
            format!("Invalid duration. Must be one of: {}", OFFER_DURATIONS.join(", ")),
        ));
    }

    if (mode == "PAY_AS_YOU_GO" || mode == "PAY_UP_FRONT")
        && !has_rel(body, "subscriptionPricePoint")
    {
        return Err(ValidationError::new(
            400,
            "MISSING_RELATIONSHIP",
            "subscriptionPricePoint is required for paid offers",
        ));
    }

    Ok(())
}

/// Duration must be in the allowed set for the billing period.
pub(crate) fn duration_for_period(duration: &str, period: &str) -> Result<(), ValidationError> {
    let allowed = allowed_durations(period);
    if allowed.contains(&duration) {
        return Ok(());
    }
    Err(ValidationError::new(
        400,
        "INVALID_ATTRIBUTE",
        format!(
            "Duration '{duration}' is not valid for subscription period '{period}'. \
             Valid durations: {}",
            allowed.join(", ")
        ),
    ))
}

/// Billing-period mutation: a set period is immutable (equal values are a
/// no-op), an unset one accepts any value from the fixed enum.
pub(crate) fn period_change(
    current: Option<&str>,
    requested: &str,
) -> Result<(), ValidationError> {
    if let Some(current) = current {
        if current != requested {
            return Err(ValidationError::new(
                409,
                "ENTITY_ERROR.ATTRIBUTE.INVALID",
                format!(
                    "Subscription period cannot be changed once set. \
                     Current: {current}, Requested: {requested}"
                ),
            ));
        }
        return Ok(());
    }
    if !BILLING_PERIODS.contains(&requested) {
        return Err(ValidationError::new(
            400,
            "INVALID_ATTRIBUTE",
            format!(
                "Invalid subscriptionPeriod: {requested}. Valid values: {}",
                BILLING_PERIODS.join(", ")
            ),
        ));
    }
    Ok(())
}

/// One offer per (subscription, territory): scan the subscription's existing
/// offers for one already targeting the requested territory.
pub(crate) fn unique_offer_territory(
    store: &EntityStore,
    subscription_id: &str,
    territory_id: &str,
) -> Result<(), ValidationError> {
    let existing = store
        .offers_by_subscription
        .get(subscription_id)
        .map_or(&[][..], Vec::as_slice);
    for offer_id in existing {
        let territory = store
            .introductory_offers
            .get(offer_id)
            .and_then(|offer| offer.relationship_id("territory"));
        if territory == Some(territory_id) {
            return Err(ValidationError::new(
                409,
                "ENTITY_ERROR.RELATIONSHIP.INVALID",
                format!(
                    "An introductory offer already exists for territory {territory_id}. \
                     Only one offer per territory is allowed at a time."
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
