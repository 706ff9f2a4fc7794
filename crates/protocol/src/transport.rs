// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The transport seam between the client and the wire.
//!
//! The outbound HTTP client issues [`ApiRequest`]s through a [`Transport`]
//! and never sees which implementation answers: production uses a real HTTP
//! transport, tests hand the client an in-process API simulator.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// HTTP verbs the API uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    /// Uppercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request as the client hands it to a transport.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    /// Verb.
    pub method: Method,
    /// Either a path with optional query (`/v1/apps?limit=10`) or an
    /// absolute URL (pagination `next` links are absolute).
    pub url: String,
    /// Extra headers (authorization, mainly).
    pub headers: Vec<(String, String)>,
    /// JSON body for POST/PATCH/relationship-DELETE requests.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST request with a JSON body.
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    /// PATCH request with a JSON body.
    pub fn patch(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Patch,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    /// DELETE request, optionally with a linkage body.
    pub fn delete(url: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method: Method::Delete,
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    /// Attach a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A response as a transport returns it.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// Decoded JSON body; `Null` for empty bodies (204 and friends).
    pub body: Value,
}

impl ApiResponse {
    /// Build a JSON response with no headers.
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body,
        }
    }

    /// Attach a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors below the protocol level: the request never produced a response
/// document. Protocol-level errors (4xx/5xx envelopes) are ordinary
/// [`ApiResponse`]s and classified by the caller.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection-level failure.
    #[error("request failed: {0}")]
    Network(String),

    /// The response body was not valid JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can answer an [`ApiRequest`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one request and return the response document.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
