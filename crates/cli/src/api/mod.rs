// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound API plumbing: credentials and token signing, the HTTP
//! transport, and the high-level client.

pub mod auth;
pub mod client;
pub mod http;

pub use auth::{AuthError, Credentials, TokenSigner};
pub use client::{ApiError, BetaGroupParams, OfferParams, Page, StorefrontClient};
pub use http::ReqwestTransport;
