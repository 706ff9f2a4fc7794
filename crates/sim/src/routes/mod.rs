// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Route handlers, one function per (verb, path pattern).
//!
//! The table below is evaluated in order by the dispatcher; first match
//! wins. Patterns are anchored regexes over the path with the query already
//! stripped, using named captures for path parameters.

mod apps;
mod offers;
mod pricing;
mod subscriptions;
mod territories;
mod testflight;

use storefront_protocol::{ApiResponse, Method};

use crate::request::RouteRequest;
use crate::store::EntityStore;

pub(crate) type Handler = fn(&RouteRequest, &mut EntityStore) -> ApiResponse;

pub(crate) struct Route {
    pub method: Method,
    pub pattern: &'static str,
    pub handler: Handler,
}

const fn route(method: Method, pattern: &'static str, handler: Handler) -> Route {
    Route {
        method,
        pattern,
        handler,
    }
}

/// Full route table in registration order.
pub(crate) fn table() -> Vec<Route> {
    use Method::{Delete, Get, Patch, Post};
    vec![
        // Apps
        route(Get, r"^/apps$", apps::list_apps),
        route(Get, r"^/apps/(?P<app_id>[^/]+)$", apps::get_app),
        // Subscription groups and subscriptions
        route(
            Get,
            r"^/apps/(?P<app_id>[^/]+)/subscriptionGroups$",
            subscriptions::list_subscription_groups,
        ),
        route(
            Get,
            r"^/subscriptionGroups/(?P<group_id>[^/]+)/subscriptions$",
            subscriptions::list_subscriptions,
        ),
        route(
            Get,
            r"^/subscriptions/(?P<subscription_id>[^/]+)$",
            subscriptions::get_subscription,
        ),
        route(
            Patch,
            r"^/subscriptions/(?P<subscription_id>[^/]+)$",
            subscriptions::update_subscription,
        ),
        route(
            Get,
            r"^/subscriptions/(?P<subscription_id>[^/]+)/subscriptionLocalizations$",
            subscriptions::list_localizations,
        ),
        // Availability
        route(
            Get,
            r"^/subscriptions/(?P<subscription_id>[^/]+)/subscriptionAvailability$",
            subscriptions::get_availability,
        ),
        route(
            Post,
            r"^/subscriptionAvailabilities$",
            subscriptions::create_availability,
        ),
        // Pricing
        route(
            Get,
            r"^/subscriptions/(?P<subscription_id>[^/]+)/pricePoints$",
            pricing::list_price_points,
        ),
        route(
            Get,
            r"^/subscriptionPricePoints/(?P<price_point_id>[^/]+)/equalizations$",
            pricing::list_equalizations,
        ),
        route(
            Get,
            r"^/subscriptions/(?P<subscription_id>[^/]+)/prices$",
            pricing::list_prices,
        ),
        route(Post, r"^/subscriptionPrices$", pricing::create_price),
        // Introductory offers
        route(
            Get,
            r"^/subscriptions/(?P<subscription_id>[^/]+)/introductoryOffers$",
            offers::list_offers,
        ),
        route(Post, r"^/subscriptionIntroductoryOffers$", offers::create_offer),
        route(
            Delete,
            r"^/subscriptionIntroductoryOffers/(?P<offer_id>[^/]+)$",
            offers::delete_offer,
        ),
        // Territories
        route(Get, r"^/territories$", territories::list_territories),
        // Builds and beta testing
        route(Get, r"^/builds$", testflight::list_builds),
        route(
            Get,
            r"^/builds/(?P<build_id>[^/]+)/betaBuildLocalizations$",
            testflight::list_beta_build_localizations,
        ),
        route(
            Post,
            r"^/betaBuildLocalizations$",
            testflight::create_beta_build_localization,
        ),
        route(
            Patch,
            r"^/betaBuildLocalizations/(?P<localization_id>[^/]+)$",
            testflight::update_beta_build_localization,
        ),
        route(
            Get,
            r"^/builds/(?P<build_id>[^/]+)/appEncryptionDeclaration$",
            testflight::get_encryption_declaration,
        ),
        route(
            Post,
            r"^/appEncryptionDeclarations$",
            testflight::create_encryption_declaration,
        ),
        route(
            Post,
            r"^/betaAppReviewSubmissions$",
            testflight::create_beta_review_submission,
        ),
        route(
            Get,
            r"^/apps/(?P<app_id>[^/]+)/betaGroups$",
            testflight::list_beta_groups,
        ),
        route(
            Get,
            r"^/betaGroups/(?P<group_id>[^/]+)$",
            testflight::get_beta_group,
        ),
        route(Post, r"^/betaGroups$", testflight::create_beta_group),
        route(
            Patch,
            r"^/betaGroups/(?P<group_id>[^/]+)$",
            testflight::update_beta_group,
        ),
        route(
            Delete,
            r"^/betaGroups/(?P<group_id>[^/]+)$",
            testflight::delete_beta_group,
        ),
        route(
            Post,
            r"^/betaGroups/(?P<group_id>[^/]+)/relationships/builds$",
            testflight::add_builds_to_beta_group,
        ),
        route(Get, r"^/betaTesters$", testflight::list_beta_testers),
        route(
            Get,
            r"^/betaTesters/(?P<tester_id>[^/]+)$",
            testflight::get_beta_tester,
        ),
        route(Post, r"^/betaTesters$", testflight::create_beta_tester),
        route(
            Delete,
            r"^/betaTesters/(?P<tester_id>[^/]+)$",
            testflight::delete_beta_tester,
        ),
        route(
            Post,
            r"^/betaTesters/(?P<tester_id>[^/]+)/relationships/betaGroups$",
            testflight::add_beta_tester_to_groups,
        ),
        route(
            Delete,
            r"^/betaTesters/(?P<tester_id>[^/]+)/relationships/betaGroups$",
            testflight::remove_beta_tester_from_groups,
        ),
        route(
            Get,
            r"^/builds/(?P<build_id>[^/]+)/buildBetaDetail$",
            testflight::get_build_beta_details,
        ),
        route(
            Patch,
            r"^/buildBetaDetails/(?P<details_id>[^/]+)$",
            testflight::update_build_beta_details,
        ),
    ]
}
