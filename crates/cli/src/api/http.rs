// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Real HTTP transport over reqwest.

use async_trait::async_trait;
use serde_json::Value;
use storefront_protocol::{ApiRequest, ApiResponse, Method, Transport, TransportError, BASE_URL};

use crate::api::auth::TokenSigner;

/// Sends requests to the live API, signing each one with a bearer token.
/// Relative paths resolve against the base URL; absolute URLs (pagination
/// `next` links) pass through untouched.
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
    signer: TokenSigner,
}

impl ReqwestTransport {
    pub fn new(signer: TokenSigner) -> Self {
        Self::with_base_url(signer, BASE_URL)
    }

    pub fn with_base_url(signer: TokenSigner, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            signer,
        }
    }

    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}{url}", self.base_url)
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let token = self
            .signer
            .token()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let url = self.resolve(&request.url);
        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Patch => self.http.patch(&url),
            Method::Delete => self.http.delete(&url),
        };
        builder = builder.bearer_auth(token);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
