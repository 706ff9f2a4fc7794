// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wire-format types for the storefront commerce API.
//!
//! The API speaks a JSON-document dialect: every resource is a
//! `{type, id, attributes, relationships?}` object and every response is a
//! `{data, included?, links?, meta?}` envelope (or `{errors: [...]}`).
//! This crate holds the shared types, typed accessors for walking untyped
//! request payloads, and the [`Transport`] seam that both the real HTTP
//! client and the in-process API simulator plug into.

mod accessor;
mod resource;
mod transport;

pub use accessor::{
    attr, attr_bool, attr_i64, attr_str, attributes, data_id, data_type, document_data, has_rel,
    linkage_ids, rel_id, rel_ids, relationships,
};
pub use resource::{
    Envelope, ErrorEnvelope, ErrorObject, ErrorSource, Links, PrimaryData, Resource,
};
pub use transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};

/// Production base URL, including the version prefix.
///
/// Pagination `next` links are absolute URLs under this base; the simulator
/// emits them and the client follows them verbatim.
pub const BASE_URL: &str = "https://api.storefront.example.com/v1";
