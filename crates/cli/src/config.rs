// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative subscription configuration for `storefront apply`.
//!
//! A TOML file describes the desired state of an app's subscriptions:
//! billing period, prices by territory, introductory offers, and territory
//! availability. Applying is idempotent: state that already matches is left
//! alone, so a config can be re-applied safely.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level apply configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplyConfig {
    /// Desired subscriptions, matched by product id within the app's
    /// subscription groups.
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionConfig {
    /// Product identifier of an existing subscription.
    pub product_id: String,

    /// Billing period; applied only when the subscription has none yet.
    #[serde(default)]
    pub period: Option<String>,

    /// Territory codes the subscription should be available in. Replaces
    /// the current set when non-empty.
    #[serde(default)]
    pub availability: Vec<String>,

    #[serde(default)]
    pub prices: Vec<PriceConfig>,

    #[serde(default)]
    pub offers: Vec<OfferConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceConfig {
    pub territory: String,

    /// Customer price in the territory's currency, matched against an
    /// existing price point (e.g. "9.99").
    pub price: String,

    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub preserve_current: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OfferConfig {
    pub territory: String,

    /// FREE_TRIAL, PAY_AS_YOU_GO or PAY_UP_FRONT.
    pub mode: String,

    pub duration: String,

    #[serde(default = "default_periods")]
    pub number_of_periods: i64,

    /// Offer price in the territory's currency, required for the paid
    /// modes; resolved to a price point.
    #[serde(default)]
    pub price: Option<String>,
}

fn default_periods() -> i64 {
    1
}

impl ApplyConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
