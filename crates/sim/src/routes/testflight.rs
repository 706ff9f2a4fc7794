// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build and beta-testing endpoints.
//!
//! The relationship endpoints follow the documented semantics: membership
//! edits are idempotent and silently skip ids that do not exist, answering
//! 200 with an empty object either way.

use serde_json::json;
use storefront_protocol::{
    attr, attr_bool, attr_i64, attr_str, linkage_ids, rel_id, rel_ids, ApiResponse, Resource,
};

use crate::document;
use crate::request::RouteRequest;
use crate::store::EntityStore;

const PUBLIC_LINK_BASE: &str = "https://beta.storefront.example.com/join";

/// GET /builds.
///
/// Listing is scoped by `filter[app]`; without it the endpoint answers an
/// empty list. Also supports `filter[version]`, `filter[processingState]`,
/// and `limit` (default 10). Results are newest-first by upload date.
pub(crate) fn list_builds(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let Some(app_id) = request.query("filter[app]") else {
        return ApiResponse::json(200, document::many(&[]));
    };
    if !store.apps.contains(app_id) {
        return document::not_found("App", app_id);
    }

    let mut builds: Vec<&Resource> = store
        .app_builds
        .get(app_id)
        .map_or(&[][..], Vec::as_slice)
        .iter()
        .filter_map(|id| store.builds.get(id))
        .collect();

    if let Some(version) = request.query("filter[version]") {
        builds.retain(|build| build.attr_str("version") == Some(version));
    }
    if let Some(state) = request.query("filter[processingState]") {
        builds.retain(|build| build.attr_str("processingState") == Some(state));
    }

    builds.sort_by(|a, b| {
        b.attr_str("uploadedDate")
            .unwrap_or("")
            .cmp(a.attr_str("uploadedDate").unwrap_or(""))
    });
    builds.truncate(request.query_usize("limit", 10));

    ApiResponse::json(200, document::many(&builds))
}

/// GET /builds/{id}/betaBuildLocalizations.
pub(crate) fn list_beta_build_localizations(
    request: &RouteRequest,
    store: &mut EntityStore,
) -> ApiResponse {
    let build_id = request.param("build_id");
    if !store.builds.contains(build_id) {
        return document::not_found("Build", build_id);
    }

    let localizations: Vec<&Resource> = store
        .localizations_by_build
        .get(build_id)
        .map_or(&[][..], Vec::as_slice)
        .iter()
        .filter_map(|id| store.beta_build_localizations.get(id))
        .collect();

    ApiResponse::json(200, document::many(&localizations))
}

/// POST /betaBuildLocalizations.
pub(crate) fn create_beta_build_localization(
    request: &RouteRequest,
    store: &mut EntityStore,
) -> ApiResponse {
    let body = &request.body;
    let build_id = rel_id(body, "build").unwrap_or("unknown").to_string();
    if !store.builds.contains(&build_id) {
        return document::not_found("Build", &build_id);
    }

    let locale = attr_str(body, "locale").unwrap_or("en-US").to_string();
    let whats_new = attr_str(body, "whatsNew").map(str::to_string);

    let localization_id = store.next_id("loc_");
    let localization = store.add_beta_build_localization(
        &localization_id,
        &build_id,
        &locale,
        whats_new.as_deref(),
    );
    ApiResponse::json(201, document::one(&localization))
}

/// PATCH /betaBuildLocalizations/{id}.
pub(crate) fn update_beta_build_localization(
    request: &RouteRequest,
    store: &mut EntityStore,
) -> ApiResponse {
    let localization_id = request.param("localization_id");
    let whats_new = attr(&request.body, "whatsNew").cloned();

    let Some(localization) = store.beta_build_localizations.get_mut(localization_id) else {
        return document::not_found("BetaBuildLocalization", localization_id);
    };
    if let Some(whats_new) = whats_new {
        localization
            .attributes
            .insert("whatsNew".to_string(), whats_new);
    }
    ApiResponse::json(200, document::one(localization))
}

/// GET /builds/{id}/appEncryptionDeclaration.
///
/// `{"data": null}` when the build has no declaration yet.
pub(crate) fn get_encryption_declaration(
    request: &RouteRequest,
    store: &mut EntityStore,
) -> ApiResponse {
    let build_id = request.param("build_id");
    if !store.builds.contains(build_id) {
        return document::not_found("Build", build_id);
    }

    let declaration = store
        .encryption_declarations
        .values()
        .find(|declaration| declaration.relationship_id("build") == Some(build_id));
    match declaration {
        Some(declaration) => ApiResponse::json(200, document::one(declaration)),
        None => ApiResponse::json(200, document::null_data()),
    }
}

/// POST /appEncryptionDeclarations.
pub(crate) fn create_encryption_declaration(
    request: &RouteRequest,
    store: &mut EntityStore,
) -> ApiResponse {
    let body = &request.body;
    let build_id = rel_id(body, "build").unwrap_or("unknown").to_string();
    if !store.builds.contains(&build_id) {
        return document::not_found("Build", &build_id);
    }

    let uses_encryption = attr_bool(body, "usesEncryption").unwrap_or(false);
    let exempt = attr_bool(body, "isExempt").unwrap_or(true);

    let declaration_id = store.next_id("encr_");
    let declaration =
        store.add_encryption_declaration(&declaration_id, &build_id, uses_encryption, exempt);
    ApiResponse::json(201, document::one(&declaration))
}

/// POST /betaAppReviewSubmissions.
pub(crate) fn create_beta_review_submission(
    request: &RouteRequest,
    store: &mut EntityStore,
) -> ApiResponse {
    let build_id = rel_id(&request.body, "build").unwrap_or("unknown").to_string();
    if !store.builds.contains(&build_id) {
        return document::not_found("Build", &build_id);
    }

    let submission = store.submit_build_for_beta_review(&build_id);
    ApiResponse::json(201, document::one(&submission))
}

/// GET /apps/{id}/betaGroups, `limit` default 50.
pub(crate) fn list_beta_groups(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let app_id = request.param("app_id");
    if !store.apps.contains(app_id) {
        return document::not_found("App", app_id);
    }

    let mut groups: Vec<&Resource> = store
        .app_beta_groups
        .get(app_id)
        .map_or(&[][..], Vec::as_slice)
        .iter()
        .filter_map(|id| store.beta_groups.get(id))
        .collect();
    groups.truncate(request.query_usize("limit", 50));

    ApiResponse::json(200, document::many(&groups))
}

/// GET /betaGroups/{id}.
pub(crate) fn get_beta_group(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let group_id = request.param("group_id");
    match store.beta_groups.get(group_id) {
        Some(group) => ApiResponse::json(200, document::one(group)),
        None => document::not_found("BetaGroup", group_id),
    }
}

/// POST /betaGroups.
pub(crate) fn create_beta_group(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let body = &request.body;
    let app_id = rel_id(body, "app").unwrap_or("unknown").to_string();
    if !store.apps.contains(&app_id) {
        return document::not_found("App", &app_id);
    }

    let name = attr_str(body, "name").unwrap_or("Untitled Group").to_string();
    let internal = attr_bool(body, "isInternalGroup").unwrap_or(false);
    let public_link_enabled = attr_bool(body, "publicLinkEnabled").unwrap_or(false);
    let public_link_limit = attr_i64(body, "publicLinkLimit");
    let feedback_enabled = attr_bool(body, "feedbackEnabled").unwrap_or(true);

    let group_id = store.next_id("group_");
    let group = store.add_beta_group(
        &group_id,
        &app_id,
        &name,
        internal,
        public_link_enabled,
        public_link_limit,
        feedback_enabled,
    );
    ApiResponse::json(201, document::one(&group))
}

/// PATCH /betaGroups/{id}.
pub(crate) fn update_beta_group(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let group_id = request.param("group_id").to_string();
    let body = request.body.clone();

    let Some(group) = store.beta_groups.get_mut(&group_id) else {
        return document::not_found("BetaGroup", &group_id);
    };

    for field in ["name", "publicLinkEnabled", "publicLinkLimit", "feedbackEnabled"] {
        if let Some(value) = attr(&body, field) {
            group.attributes.insert(field.to_string(), value.clone());
        }
    }

    // Enabling the public link mints a join URL; disabling clears it.
    match attr_bool(&body, "publicLinkEnabled") {
        Some(true) => {
            group.attributes.insert(
                "publicLink".to_string(),
                json!(format!("{PUBLIC_LINK_BASE}/{group_id}")),
            );
        }
        Some(false) => {
            group
                .attributes
                .insert("publicLink".to_string(), serde_json::Value::Null);
        }
        None => {}
    }

    ApiResponse::json(200, document::one(group))
}

/// DELETE /betaGroups/{id}, cascading membership cleanup.
pub(crate) fn delete_beta_group(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let group_id = request.param("group_id");
    if store.delete_beta_group(group_id) {
        ApiResponse::json(200, json!({}))
    } else {
        document::not_found("BetaGroup", group_id)
    }
}

/// POST /betaGroups/{id}/relationships/builds.
pub(crate) fn add_builds_to_beta_group(
    request: &RouteRequest,
    store: &mut EntityStore,
) -> ApiResponse {
    let group_id = request.param("group_id");
    if !store.beta_groups.contains(group_id) {
        return document::not_found("BetaGroup", group_id);
    }

    let build_ids: Vec<String> = linkage_ids(&request.body)
        .into_iter()
        .map(str::to_string)
        .collect();
    for build_id in &build_ids {
        if store.builds.contains(build_id) {
            store.add_build_to_beta_group(build_id, group_id);
        }
    }
    ApiResponse::json(200, json!({}))
}

/// GET /betaTesters with `filter[email]` and `filter[apps]` (via group
/// membership), `limit` default 50.
pub(crate) fn list_beta_testers(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let mut testers: Vec<&Resource> = store.beta_testers.values().collect();

    if let Some(email) = request.query("filter[email]") {
        testers.retain(|tester| tester.attr_str("email") == Some(email));
    }
    if let Some(app_id) = request.query("filter[apps]") {
        let mut in_app: Vec<&str> = Vec::new();
        for group_id in store.app_beta_groups.get(app_id).map_or(&[][..], Vec::as_slice) {
            for tester_id in store
                .beta_group_testers
                .get(group_id)
                .map_or(&[][..], Vec::as_slice)
            {
                in_app.push(tester_id);
            }
        }
        testers.retain(|tester| in_app.contains(&tester.id.as_str()));
    }

    testers.truncate(request.query_usize("limit", 50));
    ApiResponse::json(200, document::many(&testers))
}

/// GET /betaTesters/{id}.
pub(crate) fn get_beta_tester(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let tester_id = request.param("tester_id");
    match store.beta_testers.get(tester_id) {
        Some(tester) => ApiResponse::json(200, document::one(tester)),
        None => document::not_found("BetaTester", tester_id),
    }
}

/// POST /betaTesters. Group memberships named in the request are applied
/// for groups that exist; unknown ids are skipped.
pub(crate) fn create_beta_tester(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let body = &request.body;
    let Some(email) = attr_str(body, "email").map(str::to_string) else {
        return document::invalid_field("email", "Email is required");
    };
    let first_name = attr_str(body, "firstName").map(str::to_string);
    let last_name = attr_str(body, "lastName").map(str::to_string);
    let group_ids: Vec<String> = rel_ids(body, "betaGroups")
        .into_iter()
        .map(str::to_string)
        .collect();

    let tester_id = store.next_id("tester_");
    let tester =
        store.add_beta_tester(&tester_id, &email, first_name.as_deref(), last_name.as_deref());

    for group_id in &group_ids {
        if store.beta_groups.contains(group_id) {
            store.add_beta_tester_to_group(&tester_id, group_id);
        }
    }

    ApiResponse::json(201, document::one(&tester))
}

/// DELETE /betaTesters/{id}, cascading membership cleanup.
pub(crate) fn delete_beta_tester(request: &RouteRequest, store: &mut EntityStore) -> ApiResponse {
    let tester_id = request.param("tester_id");
    if store.delete_beta_tester(tester_id) {
        ApiResponse::json(200, json!({}))
    } else {
        document::not_found("BetaTester", tester_id)
    }
}

/// POST /betaTesters/{id}/relationships/betaGroups.
pub(crate) fn add_beta_tester_to_groups(
    request: &RouteRequest,
    store: &mut EntityStore,
) -> ApiResponse {
    let tester_id = request.param("tester_id");
    if !store.beta_testers.contains(tester_id) {
        return document::not_found("BetaTester", tester_id);
    }

    let group_ids: Vec<String> = linkage_ids(&request.body)
        .into_iter()
        .map(str::to_string)
        .collect();
    for group_id in &group_ids {
        if store.beta_groups.contains(group_id) {
            store.add_beta_tester_to_group(tester_id, group_id);
        }
    }
    ApiResponse::json(200, json!({}))
}

/// DELETE /betaTesters/{id}/relationships/betaGroups. Unknown group ids
/// are skipped; removal of an absent membership is a no-op.
pub(crate) fn remove_beta_tester_from_groups(
    request: &RouteRequest,
    store: &mut EntityStore,
) -> ApiResponse {
    let tester_id = request.param("tester_id");
    if !store.beta_testers.contains(tester_id) {
        return document::not_found("BetaTester", tester_id);
    }

    let group_ids: Vec<String> = linkage_ids(&request.body)
        .into_iter()
        .map(str::to_string)
        .collect();
    for group_id in &group_ids {
        store.remove_beta_tester_from_group(tester_id, group_id);
    }
    ApiResponse::json(200, json!({}))
}

/// GET /builds/{id}/buildBetaDetail.
pub(crate) fn get_build_beta_details(
    request: &RouteRequest,
    store: &mut EntityStore,
) -> ApiResponse {
    let build_id = request.param("build_id");
    if !store.builds.contains(build_id) {
        return document::not_found("Build", build_id);
    }

    let details_id = format!("details_{build_id}");
    match store.build_beta_details.get(&details_id) {
        Some(details) => ApiResponse::json(200, document::one(details)),
        None => document::not_found("BuildBetaDetail", &details_id),
    }
}

/// PATCH /buildBetaDetails/{id}.
pub(crate) fn update_build_beta_details(
    request: &RouteRequest,
    store: &mut EntityStore,
) -> ApiResponse {
    let details_id = request.param("details_id");
    let auto_notify = attr(&request.body, "autoNotifyEnabled").cloned();

    let Some(details) = store.build_beta_details.get_mut(details_id) else {
        return document::not_found("BuildBetaDetail", details_id);
    };
    if let Some(auto_notify) = auto_notify {
        details
            .attributes
            .insert("autoNotifyEnabled".to_string(), auto_notify);
    }
    ApiResponse::json(200, document::one(details))
}
