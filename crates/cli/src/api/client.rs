// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! High-level API client.
//!
//! One method per endpoint over any [`Transport`], with error envelopes
//! decoded into [`ApiError`] and pagination followed transparently. List
//! methods that paginate return every page's resources plus the union of
//! the pages' `included` sections, deduplicated by `(type, id)`.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{json, Value};
use storefront_protocol::{
    ApiRequest, ApiResponse, Envelope, ErrorEnvelope, Resource, Transport, TransportError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A 4xx/5xx error envelope from the API.
    #[error("{code}: {detail}")]
    Api {
        status: u16,
        code: String,
        detail: String,
    },

    #[error("rate limited, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    /// A 2xx response whose body did not carry the expected document.
    #[error("unexpected response shape from {url}")]
    Shape { url: String },
}

impl ApiError {
    fn from_response(response: &ApiResponse) -> Self {
        if response.status == 429 {
            let retry_after = response
                .header("Retry-After")
                .and_then(|value| value.parse().ok())
                .unwrap_or(60);
            return ApiError::RateLimited { retry_after };
        }
        match serde_json::from_value::<ErrorEnvelope>(response.body.clone()) {
            Ok(envelope) => match envelope.first() {
                Some(error) => ApiError::Api {
                    status: response.status,
                    code: error.code.clone(),
                    detail: error.detail.clone(),
                },
                None => ApiError::Api {
                    status: response.status,
                    code: "UNKNOWN".to_string(),
                    detail: "response carried no error document".to_string(),
                },
            },
            Err(_) => ApiError::Api {
                status: response.status,
                code: "UNKNOWN".to_string(),
                detail: "response carried no error document".to_string(),
            },
        }
    }
}

/// Accumulated pages of a paginated listing.
#[derive(Debug, Default)]
pub struct Page {
    pub resources: Vec<Resource>,
    pub included: Vec<Resource>,
}

/// Parameters for introductory offer creation.
#[derive(Debug)]
pub struct OfferParams<'a> {
    pub subscription_id: &'a str,
    pub territory_id: &'a str,
    pub offer_mode: &'a str,
    pub duration: &'a str,
    pub number_of_periods: i64,
    /// Required by the API for the paid offer modes.
    pub price_point_id: Option<&'a str>,
}

/// Parameters for beta group creation.
#[derive(Debug)]
pub struct BetaGroupParams<'a> {
    pub app_id: &'a str,
    pub name: &'a str,
    pub internal: bool,
    pub public_link_enabled: bool,
    pub public_link_limit: Option<i64>,
    pub feedback_enabled: bool,
}

pub struct StorefrontClient {
    transport: Arc<dyn Transport>,
}

impl StorefrontClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    // ---- wire primitives ----

    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        tracing::debug!(method = %request.method, url = %request.url, "api request");
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, "api response");
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_response(&response))
        }
    }

    async fn get_envelope(&self, url: &str) -> Result<Envelope, ApiError> {
        let response = self.request(ApiRequest::get(url)).await?;
        serde_json::from_value(response.body).map_err(|_| ApiError::Shape {
            url: url.to_string(),
        })
    }

    /// One GET answering a single-resource document.
    async fn get_one(&self, url: &str) -> Result<Resource, ApiError> {
        self.get_envelope(url)
            .await?
            .into_single()
            .ok_or_else(|| ApiError::Shape {
                url: url.to_string(),
            })
    }

    /// One GET answering a single resource or `{"data": null}`.
    async fn get_optional(&self, url: &str) -> Result<Option<Resource>, ApiError> {
        Ok(self.get_envelope(url).await?.into_single())
    }

    /// One GET answering a list document, single page.
    async fn get_list(&self, url: &str) -> Result<Vec<Resource>, ApiError> {
        Ok(self.get_envelope(url).await?.into_resources())
    }

    /// Follow `links.next` (relative or absolute) until absent.
    async fn get_paginated(&self, url: &str) -> Result<Page, ApiError> {
        let mut page = Page::default();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut next = Some(url.to_string());

        while let Some(url) = next {
            let envelope = self.get_envelope(&url).await?;
            next = envelope.next_link().map(str::to_string);
            if let Some(included) = &envelope.included {
                for resource in included {
                    if seen.insert((resource.kind.clone(), resource.id.clone())) {
                        page.included.push(resource.clone());
                    }
                }
            }
            page.resources.extend(envelope.into_resources());
        }
        Ok(page)
    }

    async fn post_one(&self, url: &str, body: Value) -> Result<Resource, ApiError> {
        let response = self.request(ApiRequest::post(url, body)).await?;
        decode_single(response, url)
    }

    async fn patch_one(&self, url: &str, body: Value) -> Result<Resource, ApiError> {
        let response = self.request(ApiRequest::patch(url, body)).await?;
        decode_single(response, url)
    }

    async fn delete(&self, url: &str, body: Option<Value>) -> Result<(), ApiError> {
        self.request(ApiRequest::delete(url, body)).await?;
        Ok(())
    }

    // ---- apps ----

    pub async fn list_apps(&self, bundle_id: Option<&str>) -> Result<Vec<Resource>, ApiError> {
        let url = match bundle_id {
            Some(bundle_id) => format!("/apps?filter[bundleId]={bundle_id}"),
            None => "/apps".to_string(),
        };
        self.get_list(&url).await
    }

    pub async fn get_app(&self, app_id: &str) -> Result<Resource, ApiError> {
        self.get_one(&format!("/apps/{app_id}")).await
    }

    // ---- subscription catalog ----

    pub async fn list_subscription_groups(&self, app_id: &str) -> Result<Vec<Resource>, ApiError> {
        self.get_list(&format!("/apps/{app_id}/subscriptionGroups"))
            .await
    }

    pub async fn list_subscriptions(&self, group_id: &str) -> Result<Vec<Resource>, ApiError> {
        self.get_list(&format!("/subscriptionGroups/{group_id}/subscriptions"))
            .await
    }

    pub async fn get_subscription(&self, subscription_id: &str) -> Result<Resource, ApiError> {
        self.get_one(&format!("/subscriptions/{subscription_id}"))
            .await
    }

    pub async fn set_subscription_period(
        &self,
        subscription_id: &str,
        period: &str,
    ) -> Result<Resource, ApiError> {
        let body = json!({
            "data": {
                "type": "subscriptions",
                "id": subscription_id,
                "attributes": { "subscriptionPeriod": period }
            }
        });
        self.patch_one(&format!("/subscriptions/{subscription_id}"), body)
            .await
    }

    pub async fn list_localizations(
        &self,
        subscription_id: &str,
    ) -> Result<Vec<Resource>, ApiError> {
        self.get_list(&format!(
            "/subscriptions/{subscription_id}/subscriptionLocalizations"
        ))
        .await
    }

    // ---- pricing ----

    /// All price points for a subscription, following pagination. With
    /// `include_territory` the returned page carries the referenced
    /// territory resources.
    pub async fn list_price_points(
        &self,
        subscription_id: &str,
        territory: Option<&str>,
        include_territory: bool,
    ) -> Result<Page, ApiError> {
        let mut url = format!("/subscriptions/{subscription_id}/pricePoints");
        let mut separator = '?';
        if let Some(territory) = territory {
            url.push_str(&format!("{separator}filter[territory]={territory}"));
            separator = '&';
        }
        if include_territory {
            url.push_str(&format!("{separator}include=territory"));
        }
        self.get_paginated(&url).await
    }

    pub async fn list_equalizations(&self, price_point_id: &str) -> Result<Page, ApiError> {
        self.get_paginated(&format!(
            "/subscriptionPricePoints/{price_point_id}/equalizations"
        ))
        .await
    }

    pub async fn list_prices(&self, subscription_id: &str) -> Result<Vec<Resource>, ApiError> {
        self.get_list(&format!("/subscriptions/{subscription_id}/prices"))
            .await
    }

    pub async fn create_price(
        &self,
        subscription_id: &str,
        price_point_id: &str,
        start_date: Option<&str>,
        preserve_current_price: bool,
    ) -> Result<Resource, ApiError> {
        let mut attributes = serde_json::Map::new();
        if let Some(start_date) = start_date {
            attributes.insert("startDate".to_string(), json!(start_date));
        }
        attributes.insert(
            "preserveCurrentPrice".to_string(),
            json!(preserve_current_price),
        );
        let body = json!({
            "data": {
                "type": "subscriptionPrices",
                "attributes": attributes,
                "relationships": {
                    "subscription": {
                        "data": { "type": "subscriptions", "id": subscription_id }
                    },
                    "subscriptionPricePoint": {
                        "data": { "type": "subscriptionPricePoints", "id": price_point_id }
                    }
                }
            }
        });
        self.post_one("/subscriptionPrices", body).await
    }

    // ---- introductory offers ----

    pub async fn list_offers(&self, subscription_id: &str) -> Result<Vec<Resource>, ApiError> {
        self.get_list(&format!(
            "/subscriptions/{subscription_id}/introductoryOffers"
        ))
        .await
    }

    pub async fn create_offer(&self, params: &OfferParams<'_>) -> Result<Resource, ApiError> {
        let mut relationships = json!({
            "subscription": {
                "data": { "type": "subscriptions", "id": params.subscription_id }
            },
            "territory": {
                "data": { "type": "territories", "id": params.territory_id }
            }
        });
        if let (Some(price_point_id), Some(map)) =
            (params.price_point_id, relationships.as_object_mut())
        {
            map.insert(
                "subscriptionPricePoint".to_string(),
                json!({"data": {"type": "subscriptionPricePoints", "id": price_point_id}}),
            );
        }
        let body = json!({
            "data": {
                "type": "subscriptionIntroductoryOffers",
                "attributes": {
                    "offerMode": params.offer_mode,
                    "duration": params.duration,
                    "numberOfPeriods": params.number_of_periods
                },
                "relationships": relationships
            }
        });
        self.post_one("/subscriptionIntroductoryOffers", body).await
    }

    pub async fn delete_offer(&self, offer_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/subscriptionIntroductoryOffers/{offer_id}"), None)
            .await
    }

    // ---- availability ----

    /// `None` when the subscription has no availability configured yet.
    pub async fn get_availability(
        &self,
        subscription_id: &str,
        include_territories: bool,
    ) -> Result<Option<Resource>, ApiError> {
        let mut url = format!("/subscriptions/{subscription_id}/subscriptionAvailability");
        if include_territories {
            url.push_str("?include=availableTerritories");
        }
        self.get_optional(&url).await
    }

    pub async fn set_availability(
        &self,
        subscription_id: &str,
        territory_ids: &[String],
    ) -> Result<Resource, ApiError> {
        let territories: Vec<Value> = territory_ids
            .iter()
            .map(|id| json!({"type": "territories", "id": id}))
            .collect();
        let body = json!({
            "data": {
                "type": "subscriptionAvailabilities",
                "attributes": { "availableInNewTerritories": true },
                "relationships": {
                    "subscription": {
                        "data": { "type": "subscriptions", "id": subscription_id }
                    },
                    "availableTerritories": { "data": territories }
                }
            }
        });
        self.post_one("/subscriptionAvailabilities", body).await
    }

    // ---- territories ----

    pub async fn list_territories(&self) -> Result<Vec<Resource>, ApiError> {
        self.get_list("/territories").await
    }

    // ---- builds and beta testing ----

    pub async fn list_builds(
        &self,
        app_id: &str,
        version: Option<&str>,
        processing_state: Option<&str>,
    ) -> Result<Vec<Resource>, ApiError> {
        let mut url = format!("/builds?filter[app]={app_id}");
        if let Some(version) = version {
            url.push_str(&format!("&filter[version]={version}"));
        }
        if let Some(state) = processing_state {
            url.push_str(&format!("&filter[processingState]={state}"));
        }
        self.get_list(&url).await
    }

    pub async fn list_beta_build_localizations(
        &self,
        build_id: &str,
    ) -> Result<Vec<Resource>, ApiError> {
        self.get_list(&format!("/builds/{build_id}/betaBuildLocalizations"))
            .await
    }

    pub async fn create_beta_build_localization(
        &self,
        build_id: &str,
        locale: &str,
        whats_new: Option<&str>,
    ) -> Result<Resource, ApiError> {
        let body = json!({
            "data": {
                "type": "betaBuildLocalizations",
                "attributes": {
                    "locale": locale,
                    "whatsNew": whats_new
                },
                "relationships": {
                    "build": { "data": { "type": "builds", "id": build_id } }
                }
            }
        });
        self.post_one("/betaBuildLocalizations", body).await
    }

    pub async fn update_beta_build_localization(
        &self,
        localization_id: &str,
        whats_new: &str,
    ) -> Result<Resource, ApiError> {
        let body = json!({
            "data": {
                "type": "betaBuildLocalizations",
                "id": localization_id,
                "attributes": { "whatsNew": whats_new }
            }
        });
        self.patch_one(&format!("/betaBuildLocalizations/{localization_id}"), body)
            .await
    }

    /// `Ok(None)` when the build has no declaration on file yet.
    pub async fn get_encryption_declaration(
        &self,
        build_id: &str,
    ) -> Result<Option<Resource>, ApiError> {
        self.get_optional(&format!("/builds/{build_id}/appEncryptionDeclaration"))
            .await
    }

    pub async fn create_encryption_declaration(
        &self,
        build_id: &str,
        uses_encryption: bool,
        exempt: bool,
    ) -> Result<Resource, ApiError> {
        let body = json!({
            "data": {
                "type": "appEncryptionDeclarations",
                "attributes": {
                    "usesEncryption": uses_encryption,
                    "isExempt": exempt
                },
                "relationships": {
                    "build": { "data": { "type": "builds", "id": build_id } }
                }
            }
        });
        self.post_one("/appEncryptionDeclarations", body).await
    }

    pub async fn submit_for_beta_review(&self, build_id: &str) -> Result<Resource, ApiError> {
        let body = json!({
            "data": {
                "type": "betaAppReviewSubmissions",
                "relationships": {
                    "build": { "data": { "type": "builds", "id": build_id } }
                }
            }
        });
        self.post_one("/betaAppReviewSubmissions", body).await
    }

    pub async fn get_build_beta_details(&self, build_id: &str) -> Result<Resource, ApiError> {
        self.get_one(&format!("/builds/{build_id}/buildBetaDetail"))
            .await
    }

    pub async fn set_auto_notify(
        &self,
        details_id: &str,
        auto_notify: bool,
    ) -> Result<Resource, ApiError> {
        let body = json!({
            "data": {
                "type": "buildBetaDetails",
                "id": details_id,
                "attributes": { "autoNotifyEnabled": auto_notify }
            }
        });
        self.patch_one(&format!("/buildBetaDetails/{details_id}"), body)
            .await
    }

    pub async fn list_beta_groups(&self, app_id: &str) -> Result<Vec<Resource>, ApiError> {
        self.get_list(&format!("/apps/{app_id}/betaGroups")).await
    }

    pub async fn get_beta_group(&self, group_id: &str) -> Result<Resource, ApiError> {
        self.get_one(&format!("/betaGroups/{group_id}")).await
    }

    pub async fn create_beta_group(
        &self,
        params: &BetaGroupParams<'_>,
    ) -> Result<Resource, ApiError> {
        let body = json!({
            "data": {
                "type": "betaGroups",
                "attributes": {
                    "name": params.name,
                    "isInternalGroup": params.internal,
                    "publicLinkEnabled": params.public_link_enabled,
                    "publicLinkLimit": params.public_link_limit,
                    "feedbackEnabled": params.feedback_enabled
                },
                "relationships": {
                    "app": { "data": { "type": "apps", "id": params.app_id } }
                }
            }
        });
        self.post_one("/betaGroups", body).await
    }

    pub async fn update_beta_group(
        &self,
        group_id: &str,
        attributes: Value,
    ) -> Result<Resource, ApiError> {
        let body = json!({
            "data": {
                "type": "betaGroups",
                "id": group_id,
                "attributes": attributes
            }
        });
        self.patch_one(&format!("/betaGroups/{group_id}"), body)
            .await
    }

    pub async fn delete_beta_group(&self, group_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/betaGroups/{group_id}"), None).await
    }

    pub async fn add_builds_to_beta_group(
        &self,
        group_id: &str,
        build_ids: &[String],
    ) -> Result<(), ApiError> {
        let body = linkage_body("builds", build_ids);
        self.request(ApiRequest::post(
            format!("/betaGroups/{group_id}/relationships/builds"),
            body,
        ))
        .await?;
        Ok(())
    }

    pub async fn list_beta_testers(
        &self,
        email: Option<&str>,
        app_id: Option<&str>,
    ) -> Result<Vec<Resource>, ApiError> {
        let mut url = "/betaTesters".to_string();
        let mut separator = '?';
        if let Some(email) = email {
            url.push_str(&format!("{separator}filter[email]={email}"));
            separator = '&';
        }
        if let Some(app_id) = app_id {
            url.push_str(&format!("{separator}filter[apps]={app_id}"));
        }
        self.get_list(&url).await
    }

    pub async fn get_beta_tester(&self, tester_id: &str) -> Result<Resource, ApiError> {
        self.get_one(&format!("/betaTesters/{tester_id}")).await
    }

    pub async fn create_beta_tester(
        &self,
        email: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        group_ids: &[String],
    ) -> Result<Resource, ApiError> {
        let groups: Vec<Value> = group_ids
            .iter()
            .map(|id| json!({"type": "betaGroups", "id": id}))
            .collect();
        let body = json!({
            "data": {
                "type": "betaTesters",
                "attributes": {
                    "email": email,
                    "firstName": first_name,
                    "lastName": last_name
                },
                "relationships": {
                    "betaGroups": { "data": groups }
                }
            }
        });
        self.post_one("/betaTesters", body).await
    }

    pub async fn delete_beta_tester(&self, tester_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/betaTesters/{tester_id}"), None)
            .await
    }

    pub async fn add_tester_to_groups(
        &self,
        tester_id: &str,
        group_ids: &[String],
    ) -> Result<(), ApiError> {
        let body = linkage_body("betaGroups", group_ids);
        self.request(ApiRequest::post(
            format!("/betaTesters/{tester_id}/relationships/betaGroups"),
            body,
        ))
        .await?;
        Ok(())
    }

    pub async fn remove_tester_from_groups(
        &self,
        tester_id: &str,
        group_ids: &[String],
    ) -> Result<(), ApiError> {
        let body = linkage_body("betaGroups", group_ids);
        self.delete(
            &format!("/betaTesters/{tester_id}/relationships/betaGroups"),
            Some(body),
        )
        .await
    }
}

fn decode_single(response: ApiResponse, url: &str) -> Result<Resource, ApiError> {
    let envelope: Envelope = serde_json::from_value(response.body).map_err(|_| ApiError::Shape {
        url: url.to_string(),
    })?;
    envelope.into_single().ok_or_else(|| ApiError::Shape {
        url: url.to_string(),
    })
}

/// `{"data": [{"type": ..., "id": ...}, ...]}` linkage document.
fn linkage_body(kind: &str, ids: &[String]) -> Value {
    let refs: Vec<Value> = ids.iter().map(|id| json!({"type": kind, "id": id})).collect();
    json!({ "data": refs })
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
