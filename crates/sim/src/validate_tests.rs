#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;
use serde_json::json;

fn offer_body(mode: &str, duration: &str) -> Value {
    json!({
        "data": {
            "type": "subscriptionIntroductoryOffers",
            "attributes": {
                "duration": duration,
                "offerMode": mode,
                "numberOfPeriods": 1,
            },
            "relationships": {
                "subscription": {"data": {"type": "subscriptions", "id": "sub_1"}},
                "territory": {"data": {"type": "territories", "id": "USA"}},
            }
        }
    })
}

#[test]
fn document_rejects_missing_data_then_wrong_type() {
    let err = document(&json!({}), "subscriptions").unwrap_err();
    assert_eq!((err.status, err.code.as_str()), (400, "INVALID_REQUEST"));

    let err = document(&json!({"data": {"type": "apps"}}), "subscriptions").unwrap_err();
    assert_eq!((err.status, err.code.as_str()), (400, "INVALID_TYPE"));
    assert_eq!(err.detail, "Expected type 'subscriptions', got 'apps'");

    assert!(document(&json!({"data": {"type": "subscriptions"}}), "subscriptions").is_ok());
}

#[test]
fn price_request_requires_both_relationships() {
    let body = json!({
        "data": {
            "type": "subscriptionPrices",
            "relationships": {
                "subscription": {"data": {"type": "subscriptions", "id": "sub_1"}},
            }
        }
    });
    let err = price_request(&body).unwrap_err();
    assert_eq!(err.code, "MISSING_RELATIONSHIP");
    assert_eq!(err.detail, "Missing required relationship: subscriptionPricePoint");
}

#[test]
fn offer_request_reports_missing_attribute_before_period() {
    let mut body = offer_body("FREE_TRIAL", "ONE_WEEK");
    body["data"]["attributes"]
        .as_object_mut()
        .unwrap()
        .remove("numberOfPeriods");

    // Even with no period set, the structural failure wins.
    let err = offer_request(&body, None).unwrap_err();
    assert_eq!((err.status, err.code.as_str()), (400, "MISSING_ATTRIBUTE"));
    assert_eq!(err.detail, "Missing required attribute: numberOfPeriods");
}

#[test]
fn offer_request_needs_a_billing_period() {
    let err = offer_request(&offer_body("FREE_TRIAL", "ONE_WEEK"), None).unwrap_err();
    assert_eq!(err.status, 409);
    assert_eq!(err.code, "ENTITY_ERROR.RELATIONSHIP.INVALID");
    assert_eq!(err.detail, "Subscription duration must be set before creating offers");
}

#[test]
fn offer_request_validates_enums() {
    let err = offer_request(&offer_body("LIFETIME", "ONE_WEEK"), Some("ONE_MONTH")).unwrap_err();
    assert_eq!((err.status, err.code.as_str()), (400, "INVALID_ATTRIBUTE"));
    assert!(err.detail.starts_with("Invalid offerMode."));

    let err = offer_request(&offer_body("FREE_TRIAL", "FOUR_DAYS"), Some("ONE_MONTH")).unwrap_err();
    assert!(err.detail.starts_with("Invalid duration."));
}

#[test]
fn paid_offers_require_a_price_point() {
    let err = offer_request(&offer_body("PAY_UP_FRONT", "ONE_WEEK"), Some("ONE_MONTH")).unwrap_err();
    assert_eq!(err.code, "MISSING_RELATIONSHIP");
    assert_eq!(err.detail, "subscriptionPricePoint is required for paid offers");

    assert!(offer_request(&offer_body("FREE_TRIAL", "ONE_WEEK"), Some("ONE_MONTH")).is_ok());
}

#[rstest]
#[case("ONE_WEEK", &["THREE_DAYS"])]
#[case("ONE_MONTH", &["ONE_WEEK", "TWO_WEEKS", "ONE_MONTH", "TWO_MONTHS", "THREE_MONTHS"])]
#[case("TWO_MONTHS", &["ONE_MONTH", "TWO_MONTHS", "THREE_MONTHS", "SIX_MONTHS"])]
#[case("THREE_MONTHS", &["ONE_MONTH", "TWO_MONTHS", "THREE_MONTHS", "SIX_MONTHS"])]
#[case("SIX_MONTHS", &["ONE_MONTH", "THREE_MONTHS", "SIX_MONTHS"])]
#[case("ONE_YEAR", &["ONE_WEEK", "ONE_MONTH", "TWO_MONTHS", "THREE_MONTHS", "SIX_MONTHS", "ONE_YEAR"])]
fn duration_compatibility_table(#[case] period: &str, #[case] allowed: &[&str]) {
    assert_eq!(allowed_durations(period), allowed);
    for duration in OFFER_DURATIONS {
        let result = duration_for_period(duration, period);
        assert_eq!(result.is_ok(), allowed.contains(duration), "{duration} for {period}");
    }
}

#[test]
fn duration_violation_names_the_allowed_set() {
    let err = duration_for_period("ONE_MONTH", "ONE_WEEK").unwrap_err();
    assert_eq!((err.status, err.code.as_str()), (400, "INVALID_ATTRIBUTE"));
    assert_eq!(
        err.detail,
        "Duration 'ONE_MONTH' is not valid for subscription period 'ONE_WEEK'. \
         Valid durations: THREE_DAYS"
    );
}

#[test]
fn period_change_rules() {
    // Unset period takes any value from the enum.
    assert!(period_change(None, "ONE_MONTH").is_ok());
    let err = period_change(None, "FOREVER").unwrap_err();
    assert_eq!((err.status, err.code.as_str()), (400, "INVALID_ATTRIBUTE"));

    // Equal value is a no-op, a different one conflicts.
    assert!(period_change(Some("ONE_MONTH"), "ONE_MONTH").is_ok());
    let err = period_change(Some("ONE_MONTH"), "ONE_YEAR").unwrap_err();
    assert_eq!(err.status, 409);
    assert_eq!(err.code, "ENTITY_ERROR.ATTRIBUTE.INVALID");
    assert_eq!(
        err.detail,
        "Subscription period cannot be changed once set. Current: ONE_MONTH, Requested: ONE_YEAR"
    );
}

#[test]
fn one_offer_per_territory() {
    let mut store = EntityStore::new();
    store.add_introductory_offer("offer_1", "sub_1", "USA", "FREE_TRIAL", "ONE_WEEK", 1, None);

    assert!(unique_offer_territory(&store, "sub_1", "GBR").is_ok());
    assert!(unique_offer_territory(&store, "sub_2", "USA").is_ok());

    let err = unique_offer_territory(&store, "sub_1", "USA").unwrap_err();
    assert_eq!(err.status, 409);
    assert!(err.detail.contains("already exists for territory USA"));
}
