// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared setup: a client wired to a fresh simulation engine.

#![allow(dead_code)]

use std::sync::Arc;

use storefront_cli::api::StorefrontClient;
use storefront_sim::{fixtures, EntityStore, Simulator};

/// A client over a seeded simulator: territory table plus the standard
/// app/group/subscription catalog with the given billing period.
pub fn client_with_catalog(period: Option<&str>) -> (Arc<Simulator>, StorefrontClient) {
    let sim = Arc::new(Simulator::new());
    sim.store(|store| {
        fixtures::load_territories(store);
        fixtures::standard_catalog(store, period);
    });
    let client = StorefrontClient::new(sim.clone());
    (sim, client)
}

/// Read something out of the engine's store.
pub fn with_store<R>(sim: &Simulator, f: impl FnOnce(&mut EntityStore) -> R) -> R {
    sim.store(f)
}
