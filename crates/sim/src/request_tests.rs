#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn relative_and_absolute_urls_normalize_identically() {
    let relative = RouteRequest::parse(&ApiRequest::get("/subscriptions/sub_1/pricePoints?limit=5"));
    let absolute = RouteRequest::parse(&ApiRequest::get(format!(
        "{BASE_URL}/subscriptions/sub_1/pricePoints?limit=5"
    )));

    assert_eq!(relative.path, "/subscriptions/sub_1/pricePoints");
    assert_eq!(absolute.path, relative.path);
    assert_eq!(absolute.query("limit"), Some("5"));
}

#[test]
fn query_parsing_handles_filters_and_defaults() {
    let request = RouteRequest::parse(&ApiRequest::get(
        "/builds?filter[app]=app_1&filter[version]=42&limit=3",
    ));

    assert_eq!(request.query("filter[app]"), Some("app_1"));
    assert_eq!(request.query("filter[version]"), Some("42"));
    assert_eq!(request.query_usize("limit", 10), 3);
    assert_eq!(request.query_usize("offset", 0), 0);
    assert_eq!(request.query("missing"), None);
}

#[test]
fn malformed_numeric_query_falls_back_to_default() {
    let request = RouteRequest::parse(&ApiRequest::get("/territories?limit=abc"));
    assert_eq!(request.query_usize("limit", 200), 200);
}

#[test]
fn include_matches_whole_names_only() {
    let request = RouteRequest::parse(&ApiRequest::get("/x?include=territory,subscription"));
    assert!(request.includes("territory"));
    assert!(request.includes("subscription"));
    assert!(!request.includes("terr"));

    let bare = RouteRequest::parse(&ApiRequest::get("/x"));
    assert!(!bare.includes("territory"));
}

#[test]
fn base_url_rebuilds_the_absolute_path() {
    let request = RouteRequest::parse(&ApiRequest::get("/subscriptions/sub_1/pricePoints?limit=5"));
    assert_eq!(
        request.base_url(),
        format!("{BASE_URL}/subscriptions/sub_1/pricePoints")
    );
}
