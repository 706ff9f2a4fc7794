// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Storefront commerce API client
#[derive(Parser, Debug)]
#[command(name = "storefront", version, about = "Storefront commerce API client")]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, global = true, default_value = "table")]
    pub output: OutputMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Aligned plain-text columns
    Table,
    /// Raw JSON resources
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage API credentials
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Inspect apps
    #[command(subcommand)]
    Apps(AppsCommand),

    /// Manage subscriptions, pricing, offers and availability
    #[command(subcommand)]
    Subscriptions(SubscriptionsCommand),

    /// Manage beta builds, groups and testers
    #[command(subcommand)]
    Beta(BetaCommand),

    /// Apply a declarative subscription configuration file
    Apply(ApplyArgs),
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Store credentials in the config directory
    Login {
        /// Issuer identifier from the developer portal
        #[arg(long)]
        issuer_id: String,

        /// Key identifier of the signing key
        #[arg(long)]
        key_id: String,

        /// Path to the PEM-encoded P-256 private key
        #[arg(long)]
        private_key_path: String,
    },

    /// Show where credentials come from and whether a token can be signed
    Status,
}

#[derive(Subcommand, Debug)]
pub enum AppsCommand {
    /// List apps
    List {
        /// Only the app with this bundle identifier
        #[arg(long)]
        bundle_id: Option<String>,
    },

    /// Show one app
    Show { app_id: String },
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionsCommand {
    /// List subscription groups of an app
    Groups {
        #[arg(long)]
        app: String,
    },

    /// List subscriptions in a group
    List {
        #[arg(long)]
        group: String,
    },

    /// Show one subscription
    Show { subscription_id: String },

    /// Set the billing period (immutable once set)
    SetPeriod {
        subscription_id: String,

        /// e.g. ONE_MONTH, ONE_YEAR
        period: String,
    },

    /// List localizations of a subscription
    Localizations { subscription_id: String },

    /// List price points, optionally scoped to one territory
    PricePoints {
        subscription_id: String,

        #[arg(long)]
        territory: Option<String>,
    },

    /// List equalized price points in other territories
    Equalizations { price_point_id: String },

    /// List scheduled prices
    Prices { subscription_id: String },

    /// Schedule a price at an existing price point
    SetPrice {
        subscription_id: String,

        #[arg(long)]
        price_point: String,

        /// ISO date the price takes effect; immediate when omitted
        #[arg(long)]
        start_date: Option<String>,

        /// Keep the current price for existing subscribers
        #[arg(long)]
        preserve_current: bool,
    },

    /// List introductory offers
    Offers { subscription_id: String },

    /// Create an introductory offer
    CreateOffer {
        subscription_id: String,

        #[arg(long)]
        territory: String,

        /// FREE_TRIAL, PAY_AS_YOU_GO or PAY_UP_FRONT
        #[arg(long)]
        mode: String,

        /// e.g. THREE_DAYS, ONE_WEEK, ONE_MONTH
        #[arg(long)]
        duration: String,

        #[arg(long, default_value_t = 1)]
        periods: i64,

        /// Price point id, required for the paid modes
        #[arg(long)]
        price_point: Option<String>,
    },

    /// Delete an introductory offer
    DeleteOffer { offer_id: String },

    /// Show territory availability
    Availability { subscription_id: String },

    /// Replace territory availability
    SetAvailability {
        subscription_id: String,

        /// Territory code, repeatable
        #[arg(long = "territory", required = true)]
        territories: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BetaCommand {
    /// List builds of an app, newest first
    Builds {
        #[arg(long)]
        app: String,

        #[arg(long)]
        version: Option<String>,

        /// e.g. VALID, PROCESSING
        #[arg(long)]
        processing_state: Option<String>,
    },

    /// List beta groups of an app
    Groups {
        #[arg(long)]
        app: String,
    },

    /// Create a beta group
    CreateGroup {
        name: String,

        #[arg(long)]
        app: String,

        /// Internal (team-only) group
        #[arg(long)]
        internal: bool,

        /// Enable the public join link
        #[arg(long)]
        public_link: bool,

        /// Cap on testers joining through the public link
        #[arg(long)]
        public_link_limit: Option<i64>,

        /// Disable tester feedback collection
        #[arg(long)]
        no_feedback: bool,
    },

    /// Delete a beta group and its memberships
    DeleteGroup { group_id: String },

    /// Add builds to a beta group
    AddBuilds {
        group_id: String,

        /// Build id, repeatable
        #[arg(long = "build", required = true)]
        builds: Vec<String>,
    },

    /// List beta testers
    Testers {
        #[arg(long)]
        email: Option<String>,

        /// Only testers in this app's groups
        #[arg(long)]
        app: Option<String>,
    },

    /// Invite a beta tester
    AddTester {
        email: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// Group to add the tester to, repeatable
        #[arg(long = "group")]
        groups: Vec<String>,
    },

    /// Remove a tester from groups without deleting the tester
    RemoveTester {
        tester_id: String,

        #[arg(long = "group", required = true)]
        groups: Vec<String>,
    },

    /// Delete a beta tester and all memberships
    DeleteTester { tester_id: String },
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// TOML configuration file
    pub file: String,

    /// App the configuration applies to
    #[arg(long)]
    pub app: String,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
