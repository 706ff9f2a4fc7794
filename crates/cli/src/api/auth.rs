// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! API credentials and ES256 token signing.
//!
//! Credentials come from the environment (`STOREFRONT_ISSUER_ID`,
//! `STOREFRONT_KEY_ID`, and `STOREFRONT_PRIVATE_KEY` or
//! `STOREFRONT_PRIVATE_KEY_PATH`) or from the credentials file written by
//! `storefront auth login`. The environment wins when all of its variables
//! are set.

use std::path::{Path, PathBuf};

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed token audience.
pub const AUDIENCE: &str = "storefront-v1";
/// Token lifetime.
const TOKEN_TTL_SECS: i64 = 20 * 60;
/// Re-sign when less than this much lifetime remains.
const REFRESH_BUFFER_SECS: i64 = 5 * 60;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(
        "no credentials found: set STOREFRONT_ISSUER_ID, STOREFRONT_KEY_ID and \
         STOREFRONT_PRIVATE_KEY (or STOREFRONT_PRIVATE_KEY_PATH), or run `storefront auth login`"
    )]
    Missing,

    #[error("credentials file {path} is missing `{field}`")]
    IncompleteFile { path: String, field: &'static str },

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

    #[error("encoding credentials file: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("signing token: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

/// Issuer, key id, and the PEM-encoded P-256 private key.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub issuer_id: String,
    pub key_id: String,
    pub private_key: String,
}

/// On-disk shape of `~/.config/storefront/credentials` (TOML).
#[derive(Debug, Default, Deserialize, Serialize)]
struct CredentialsFile {
    issuer_id: Option<String>,
    key_id: Option<String>,
    /// Inline PEM. Takes precedence over `private_key_path`.
    private_key: Option<String>,
    private_key_path: Option<String>,
}

impl Credentials {
    /// Environment first, credentials file second.
    pub fn load() -> Result<Self, AuthError> {
        if let Some(credentials) = Self::from_env()? {
            return Ok(credentials);
        }
        let Some(path) = Self::default_path() else {
            return Err(AuthError::Missing);
        };
        if !path.exists() {
            return Err(AuthError::Missing);
        }
        Self::from_file(&path)
    }

    /// Credentials from the environment, `None` when any required variable
    /// is unset.
    pub fn from_env() -> Result<Option<Self>, AuthError> {
        let (Ok(issuer_id), Ok(key_id)) = (
            std::env::var("STOREFRONT_ISSUER_ID"),
            std::env::var("STOREFRONT_KEY_ID"),
        ) else {
            return Ok(None);
        };
        let private_key = match std::env::var("STOREFRONT_PRIVATE_KEY") {
            Ok(pem) => pem,
            Err(_) => match std::env::var("STOREFRONT_PRIVATE_KEY_PATH") {
                Ok(path) => read_to_string(Path::new(&path))?,
                Err(_) => return Ok(None),
            },
        };
        Ok(Some(Self {
            issuer_id,
            key_id,
            private_key,
        }))
    }

    /// Parse a credentials file.
    pub fn from_file(path: &Path) -> Result<Self, AuthError> {
        let text = read_to_string(path)?;
        let file: CredentialsFile = toml::from_str(&text).map_err(|source| AuthError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        let field_error = |field| AuthError::IncompleteFile {
            path: path.display().to_string(),
            field,
        };
        let issuer_id = file.issuer_id.ok_or_else(|| field_error("issuer_id"))?;
        let key_id = file.key_id.ok_or_else(|| field_error("key_id"))?;
        let private_key = match (file.private_key, file.private_key_path) {
            (Some(pem), _) => pem,
            (None, Some(key_path)) => read_to_string(Path::new(&key_path))?,
            (None, None) => return Err(field_error("private_key")),
        };

        Ok(Self {
            issuer_id,
            key_id,
            private_key,
        })
    }

    /// Write a credentials file referencing the key by path.
    pub fn write_file(
        path: &Path,
        issuer_id: &str,
        key_id: &str,
        private_key_path: &Path,
    ) -> Result<(), AuthError> {
        let file = CredentialsFile {
            issuer_id: Some(issuer_id.to_string()),
            key_id: Some(key_id.to_string()),
            private_key: None,
            private_key_path: Some(private_key_path.display().to_string()),
        };
        let text = toml::to_string(&file)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| AuthError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        std::fs::write(path, text).map_err(|source| AuthError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// `~/.config/storefront/credentials`.
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join("storefront").join("credentials"))
    }
}

fn read_to_string(path: &Path) -> Result<String, AuthError> {
    std::fs::read_to_string(path).map_err(|source| AuthError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    iat: i64,
    exp: i64,
    aud: &'a str,
}

struct CachedToken {
    token: String,
    expires_at: i64,
}

/// Signs and caches short-lived ES256 bearer tokens.
pub struct TokenSigner {
    credentials: Credentials,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            cached: Mutex::new(None),
        }
    }

    /// The current token, re-signed when within the refresh buffer of
    /// expiry.
    pub fn token(&self) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let mut cached = self.cached.lock();
        if let Some(existing) = cached.as_ref() {
            if existing.expires_at - now > REFRESH_BUFFER_SECS {
                return Ok(existing.token.clone());
            }
        }

        let expires_at = now + TOKEN_TTL_SECS;
        let claims = Claims {
            iss: &self.credentials.issuer_id,
            iat: now,
            exp: expires_at,
            aud: AUDIENCE,
        };
        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.credentials.key_id.clone());
        let key = EncodingKey::from_ec_pem(self.credentials.private_key.as_bytes())?;
        let token = encode(&header, &claims, &key)?;

        tracing::debug!(expires_at, "signed new api token");
        *cached = Some(CachedToken {
            token: token.clone(),
            expires_at,
        });
        Ok(token)
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
