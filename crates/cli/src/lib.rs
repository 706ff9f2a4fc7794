// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Storefront CLI
//!
//! Command-line client for the storefront commerce-management API: apps,
//! subscription groups, pricing, introductory offers, availability, and
//! beta-testing builds. Talks to the API through the
//! [`storefront_protocol::Transport`] seam, so the same client code runs
//! against the live service or an in-process simulation.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
