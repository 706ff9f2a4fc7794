// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-process simulation of the storefront commerce API.
//!
//! The simulator answers the same JSON-document protocol the production
//! backend speaks, backed by an in-memory entity store instead of a network.
//! It implements [`storefront_protocol::Transport`], so a client handed a
//! [`Simulator`] runs the exact code path it runs against the real service,
//! including pagination link following and error classification.
//!
//! Scope is one test at a time: populate the store through
//! [`Simulator::store`] or the [`fixtures`] loaders, drive the client, then
//! [`Simulator::reset`] (or drop the instance). Fault injection
//! ([`Simulator::simulate_rate_limit`], [`Simulator::simulate_error`]) runs
//! ahead of every handler and can short-circuit any request.

mod document;
mod engine;
pub mod fixtures;
mod request;
mod routes;
mod store;
mod validate;

pub use engine::Simulator;
pub use store::EntityStore;
pub use validate::ValidationError;
