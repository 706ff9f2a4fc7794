// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory entity store backing the simulated API.
//!
//! Collections are keyed by resource id but iterate in insertion order, so
//! list endpoints and pagination stay deterministic across runs. Parent to
//! child relationships are kept in explicit adjacency maps, written on both
//! sides for the many-to-many beta memberships so cascade deletes never
//! leave a dangling edge.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Map, Value};
use storefront_protocol::Resource;

/// Seconds from the unix epoch to the simulated clock's start of time.
const UPLOAD_EPOCH_SECS: i64 = 1_767_225_600; // 2026-01-01T00:00:00Z

/// A keyed collection that preserves insertion order.
#[derive(Debug, Default)]
pub struct Collection {
    items: HashMap<String, Resource>,
    order: Vec<String>,
}

impl Collection {
    /// Insert or replace a resource. Replacing keeps the original position.
    pub fn insert(&mut self, resource: Resource) {
        if !self.items.contains_key(&resource.id) {
            self.order.push(resource.id.clone());
        }
        self.items.insert(resource.id.clone(), resource);
    }

    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.items.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Resource> {
        self.items.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Resource> {
        self.order.retain(|existing| existing != id);
        self.items.remove(id)
    }

    /// Resources in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Resource> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn clear(&mut self) {
        self.items.clear();
        self.order.clear();
    }
}

/// All simulated state for one test.
///
/// Fields are public: fixture loaders and assertions reach into the store
/// directly, the same ingestion path route handlers use.
#[derive(Debug, Default)]
pub struct EntityStore {
    pub apps: Collection,
    pub subscription_groups: Collection,
    pub subscriptions: Collection,
    pub subscription_localizations: Collection,
    pub subscription_price_points: Collection,
    pub subscription_prices: Collection,
    pub introductory_offers: Collection,
    pub subscription_availabilities: Collection,
    pub territories: Collection,
    pub builds: Collection,
    pub beta_groups: Collection,
    pub beta_testers: Collection,
    pub beta_build_localizations: Collection,
    pub build_beta_details: Collection,
    pub encryption_declarations: Collection,
    pub beta_review_submissions: Collection,

    // Parent -> children.
    pub app_subscription_groups: HashMap<String, Vec<String>>,
    pub group_subscriptions: HashMap<String, Vec<String>>,
    pub localizations_by_subscription: HashMap<String, Vec<String>>,
    pub price_points_by_subscription: HashMap<String, Vec<String>>,
    pub prices_by_subscription: HashMap<String, Vec<String>>,
    pub offers_by_subscription: HashMap<String, Vec<String>>,
    pub availability_territories: HashMap<String, Vec<String>>,
    pub app_builds: HashMap<String, Vec<String>>,
    pub app_beta_groups: HashMap<String, Vec<String>>,
    pub localizations_by_build: HashMap<String, Vec<String>>,

    // Many-to-many memberships, written on both sides.
    pub beta_group_testers: HashMap<String, Vec<String>>,
    pub tester_beta_groups: HashMap<String, Vec<String>>,
    pub beta_group_builds: HashMap<String, Vec<String>>,
    pub build_beta_groups: HashMap<String, Vec<String>>,

    id_counter: u64,
}

/// Unwrap a `json!` object literal into an attribute map.
fn attrs(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn push_unique(map: &mut HashMap<String, Vec<String>>, key: &str, value: &str) {
    let entries = map.entry(key.to_string()).or_default();
    if !entries.iter().any(|existing| existing == value) {
        entries.push(value.to_string());
    }
}

fn drop_entry(map: &mut HashMap<String, Vec<String>>, key: &str, value: &str) {
    if let Some(entries) = map.get_mut(key) {
        entries.retain(|existing| existing != value);
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            id_counter: 1000,
            ..Self::default()
        }
    }

    /// Next unique id, monotonic per store.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.id_counter += 1;
        format!("{prefix}{}", self.id_counter)
    }

    /// Clear every collection and index and restart the id counter.
    pub fn reset(&mut self) {
        self.apps.clear();
        self.subscription_groups.clear();
        self.subscriptions.clear();
        self.subscription_localizations.clear();
        self.subscription_price_points.clear();
        self.subscription_prices.clear();
        self.introductory_offers.clear();
        self.subscription_availabilities.clear();
        self.territories.clear();
        self.builds.clear();
        self.beta_groups.clear();
        self.beta_testers.clear();
        self.beta_build_localizations.clear();
        self.build_beta_details.clear();
        self.encryption_declarations.clear();
        self.beta_review_submissions.clear();

        self.app_subscription_groups.clear();
        self.group_subscriptions.clear();
        self.localizations_by_subscription.clear();
        self.price_points_by_subscription.clear();
        self.prices_by_subscription.clear();
        self.offers_by_subscription.clear();
        self.availability_territories.clear();
        self.app_builds.clear();
        self.app_beta_groups.clear();
        self.localizations_by_build.clear();
        self.beta_group_testers.clear();
        self.tester_beta_groups.clear();
        self.beta_group_builds.clear();
        self.build_beta_groups.clear();

        self.id_counter = 1000;
    }

    pub fn add_territory(&mut self, code: &str, currency: &str) -> Resource {
        let territory = Resource::new("territories", code, attrs(json!({ "currency": currency })));
        self.territories.insert(territory.clone());
        territory
    }

    /// Insert an app with every wire-required attribute filled in.
    pub fn add_app(&mut self, app_id: &str, bundle_id: &str, name: &str) -> Resource {
        let app = Resource::new(
            "apps",
            app_id,
            attrs(json!({
                "bundleId": bundle_id,
                "name": name,
                "sku": app_id,
                "primaryLocale": "en-US",
                "contentRightsDeclaration": "USES_THIRD_PARTY_CONTENT",
                "subscriptionStatusUrl": null,
                "subscriptionStatusUrlForSandbox": null,
                "subscriptionStatusUrlVersion": null,
                "subscriptionStatusUrlVersionForSandbox": null,
                "isOrEverWasMadeForKids": false,
                "streamlinedPurchasingEnabled": false,
                "accessibilityUrl": null,
            })),
        );
        self.apps.insert(app.clone());
        app
    }

    pub fn add_subscription_group(
        &mut self,
        group_id: &str,
        app_id: &str,
        reference_name: &str,
    ) -> Resource {
        let group = Resource::new(
            "subscriptionGroups",
            group_id,
            attrs(json!({ "referenceName": reference_name })),
        );
        self.subscription_groups.insert(group.clone());
        push_unique(&mut self.app_subscription_groups, app_id, group_id);
        group
    }

    /// New subscriptions start in `MISSING_METADATA` with no billing period
    /// unless one is supplied.
    pub fn add_subscription(
        &mut self,
        subscription_id: &str,
        group_id: &str,
        product_id: &str,
        name: &str,
        period: Option<&str>,
    ) -> Resource {
        let subscription = Resource::new(
            "subscriptions",
            subscription_id,
            attrs(json!({
                "productId": product_id,
                "name": name,
                "state": "MISSING_METADATA",
                "subscriptionPeriod": period,
                "familySharable": true,
                "groupLevel": 1,
                "reviewNote": null,
            })),
        );
        self.subscriptions.insert(subscription.clone());
        push_unique(&mut self.group_subscriptions, group_id, subscription_id);
        subscription
    }

    pub fn add_subscription_localization(
        &mut self,
        localization_id: &str,
        subscription_id: &str,
        locale: &str,
        name: &str,
        description: Option<&str>,
    ) -> Resource {
        let localization = Resource::new(
            "subscriptionLocalizations",
            localization_id,
            attrs(json!({
                "locale": locale,
                "name": name,
                "description": description,
            })),
        );
        self.subscription_localizations.insert(localization.clone());
        push_unique(
            &mut self.localizations_by_subscription,
            subscription_id,
            localization_id,
        );
        localization
    }

    pub fn add_price_point(
        &mut self,
        price_point_id: &str,
        subscription_id: &str,
        territory_id: &str,
        customer_price: &str,
        proceeds: &str,
    ) -> Resource {
        let mut price_point = Resource::new(
            "subscriptionPricePoints",
            price_point_id,
            attrs(json!({
                "customerPrice": customer_price,
                "proceeds": proceeds,
            })),
        );
        price_point.set_relationship("territory", "territories", territory_id);
        self.subscription_price_points.insert(price_point.clone());
        push_unique(
            &mut self.price_points_by_subscription,
            subscription_id,
            price_point_id,
        );
        price_point
    }

    pub fn add_subscription_price(
        &mut self,
        price_id: &str,
        subscription_id: &str,
        price_point_id: &str,
        start_date: Option<&str>,
        preserved: bool,
    ) -> Resource {
        let mut price = Resource::new(
            "subscriptionPrices",
            price_id,
            attrs(json!({
                "startDate": start_date,
                "preserved": preserved,
            })),
        );
        price.set_relationship("subscription", "subscriptions", subscription_id);
        price.set_relationship(
            "subscriptionPricePoint",
            "subscriptionPricePoints",
            price_point_id,
        );
        self.subscription_prices.insert(price.clone());
        push_unique(&mut self.prices_by_subscription, subscription_id, price_id);
        price
    }

    pub fn add_introductory_offer(
        &mut self,
        offer_id: &str,
        subscription_id: &str,
        territory_id: &str,
        offer_mode: &str,
        duration: &str,
        number_of_periods: i64,
        price_point_id: Option<&str>,
    ) -> Resource {
        let mut offer = Resource::new(
            "subscriptionIntroductoryOffers",
            offer_id,
            attrs(json!({
                "offerMode": offer_mode,
                "duration": duration,
                "numberOfPeriods": number_of_periods,
            })),
        );
        offer.set_relationship("subscription", "subscriptions", subscription_id);
        offer.set_relationship("territory", "territories", territory_id);
        if let Some(price_point_id) = price_point_id {
            offer.set_relationship(
                "subscriptionPricePoint",
                "subscriptionPricePoints",
                price_point_id,
            );
        }
        self.introductory_offers.insert(offer.clone());
        push_unique(&mut self.offers_by_subscription, subscription_id, offer_id);
        offer
    }

    pub fn delete_introductory_offer(&mut self, offer_id: &str) -> bool {
        let Some(offer) = self.introductory_offers.remove(offer_id) else {
            return false;
        };
        if let Some(subscription_id) = offer.relationship_id("subscription") {
            let subscription_id = subscription_id.to_string();
            drop_entry(&mut self.offers_by_subscription, &subscription_id, offer_id);
        }
        true
    }

    /// At most one availability per subscription, id `avail_{subscription}`.
    pub fn set_subscription_availability(
        &mut self,
        subscription_id: &str,
        territory_ids: &[String],
        available_in_new_territories: bool,
    ) -> Resource {
        let availability_id = format!("avail_{subscription_id}");
        let mut availability = Resource::new(
            "subscriptionAvailabilities",
            &availability_id,
            attrs(json!({
                "availableInNewTerritories": available_in_new_territories,
            })),
        );
        availability.set_relationship("subscription", "subscriptions", subscription_id);
        availability.set_relationship_many("availableTerritories", "territories", territory_ids);
        self.subscription_availabilities.insert(availability.clone());
        self.availability_territories
            .insert(subscription_id.to_string(), territory_ids.to_vec());
        availability
    }

    pub fn subscription_availability_territories(&self, subscription_id: &str) -> &[String] {
        self.availability_territories
            .get(subscription_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Insert a build and its auto-created beta detail record
    /// (`details_{build}`). Uploaded dates advance with insertion order so
    /// newest-first listings are stable.
    pub fn add_build(
        &mut self,
        build_id: &str,
        app_id: &str,
        version: &str,
        build_number: &str,
    ) -> Resource {
        let uploaded = DateTime::<Utc>::UNIX_EPOCH
            + Duration::seconds(UPLOAD_EPOCH_SECS + 60 * self.builds.len() as i64);
        let mut build = Resource::new(
            "builds",
            build_id,
            attrs(json!({
                "version": version,
                "buildNumber": build_number,
                "uploadedDate": uploaded.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                "processingState": "VALID",
                "expired": false,
            })),
        );
        build.set_relationship("app", "apps", app_id);
        self.builds.insert(build.clone());
        push_unique(&mut self.app_builds, app_id, build_id);

        let details_id = format!("details_{build_id}");
        let mut details = Resource::new(
            "buildBetaDetails",
            &details_id,
            attrs(json!({
                "autoNotifyEnabled": true,
                "internalBuildState": "IN_BETA_TESTING",
                "externalBuildState": "READY_FOR_BETA_SUBMISSION",
            })),
        );
        details.set_relationship("build", "builds", build_id);
        self.build_beta_details.insert(details);

        build
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_beta_group(
        &mut self,
        group_id: &str,
        app_id: &str,
        name: &str,
        internal: bool,
        public_link_enabled: bool,
        public_link_limit: Option<i64>,
        feedback_enabled: bool,
    ) -> Resource {
        let mut group = Resource::new(
            "betaGroups",
            group_id,
            attrs(json!({
                "name": name,
                "isInternalGroup": internal,
                "publicLinkEnabled": public_link_enabled,
                "publicLink": null,
                "publicLinkLimit": public_link_limit,
                "feedbackEnabled": feedback_enabled,
            })),
        );
        group.set_relationship("app", "apps", app_id);
        self.beta_groups.insert(group.clone());
        push_unique(&mut self.app_beta_groups, app_id, group_id);
        group
    }

    pub fn add_beta_tester(
        &mut self,
        tester_id: &str,
        email: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Resource {
        let tester = Resource::new(
            "betaTesters",
            tester_id,
            attrs(json!({
                "email": email,
                "firstName": first_name,
                "lastName": last_name,
                "inviteType": "EMAIL",
            })),
        );
        self.beta_testers.insert(tester.clone());
        tester
    }

    /// Idempotent membership edit, written on both sides of the edge.
    pub fn add_beta_tester_to_group(&mut self, tester_id: &str, group_id: &str) {
        push_unique(&mut self.beta_group_testers, group_id, tester_id);
        push_unique(&mut self.tester_beta_groups, tester_id, group_id);
    }

    pub fn remove_beta_tester_from_group(&mut self, tester_id: &str, group_id: &str) {
        drop_entry(&mut self.beta_group_testers, group_id, tester_id);
        drop_entry(&mut self.tester_beta_groups, tester_id, group_id);
    }

    pub fn add_build_to_beta_group(&mut self, build_id: &str, group_id: &str) {
        push_unique(&mut self.beta_group_builds, group_id, build_id);
        push_unique(&mut self.build_beta_groups, build_id, group_id);
    }

    /// Delete a group and clear both directions of every membership edge.
    pub fn delete_beta_group(&mut self, group_id: &str) -> bool {
        let Some(group) = self.beta_groups.remove(group_id) else {
            return false;
        };
        if let Some(app_id) = group.relationship_id("app") {
            let app_id = app_id.to_string();
            drop_entry(&mut self.app_beta_groups, &app_id, group_id);
        }
        for tester_id in self.beta_group_testers.remove(group_id).unwrap_or_default() {
            drop_entry(&mut self.tester_beta_groups, &tester_id, group_id);
        }
        for build_id in self.beta_group_builds.remove(group_id).unwrap_or_default() {
            drop_entry(&mut self.build_beta_groups, &build_id, group_id);
        }
        true
    }

    pub fn delete_beta_tester(&mut self, tester_id: &str) -> bool {
        if self.beta_testers.remove(tester_id).is_none() {
            return false;
        }
        for group_id in self.tester_beta_groups.remove(tester_id).unwrap_or_default() {
            drop_entry(&mut self.beta_group_testers, &group_id, tester_id);
        }
        true
    }

    pub fn add_beta_build_localization(
        &mut self,
        localization_id: &str,
        build_id: &str,
        locale: &str,
        whats_new: Option<&str>,
    ) -> Resource {
        let mut localization = Resource::new(
            "betaBuildLocalizations",
            localization_id,
            attrs(json!({
                "locale": locale,
                "whatsNew": whats_new,
            })),
        );
        localization.set_relationship("build", "builds", build_id);
        self.beta_build_localizations.insert(localization.clone());
        push_unique(&mut self.localizations_by_build, build_id, localization_id);
        localization
    }

    pub fn add_encryption_declaration(
        &mut self,
        declaration_id: &str,
        build_id: &str,
        uses_encryption: bool,
        exempt: bool,
    ) -> Resource {
        let mut declaration = Resource::new(
            "appEncryptionDeclarations",
            declaration_id,
            attrs(json!({
                "usesEncryption": uses_encryption,
                "isExempt": exempt,
            })),
        );
        declaration.set_relationship("build", "builds", build_id);
        self.encryption_declarations.insert(declaration.clone());
        declaration
    }

    pub fn submit_build_for_beta_review(&mut self, build_id: &str) -> Resource {
        let submission_id = self.next_id("submission_");
        let mut submission = Resource::new(
            "betaAppReviewSubmissions",
            &submission_id,
            attrs(json!({ "betaReviewState": "WAITING_FOR_REVIEW" })),
        );
        submission.set_relationship("build", "builds", build_id);
        self.beta_review_submissions.insert(submission.clone());
        submission
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
