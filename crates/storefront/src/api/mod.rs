//! Backend API client.
//!
//! # Endpoints
//!
//! - `GET /api/products` - product catalog
//! - `GET /api/reviews` - customer reviews
//! - `POST /api/auth/register`, `POST /api/auth/login` - JSON form fields in,
//!   `{token}` or `{error}` out
//!
//! Catalog and review reads come in two flavours: `try_*` returns the error,
//! the plain method logs it and hands back an empty list so a page can
//! render with nothing in it. Successful reads are cached in memory via
//! `moka` for the configured TTL.
//!
//! # Example
//!
//! ```rust,ignore
//! use infpro_storefront::api::StorefrontApi;
//!
//! let api = StorefrontApi::new(&config.api)?;
//! let products = api.products().await;
//! let outcome = api.login(&serde_json::json!({"email": email, "password": pw})).await;
//! ```

mod cache;
mod client;

pub use client::StorefrontApi;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built from the configured base.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Outcome of a login or registration request.
///
/// The backend reports failures in the body, so a 4xx with `{"error": ...}`
/// is an ordinary response here, not an [`ApiError`].
#[derive(Debug, Clone, Default)]
pub struct AuthResponse {
    /// Session token, present on success.
    pub token: Option<SecretString>,
    /// Backend-provided failure message.
    pub error: Option<String>,
}

impl AuthResponse {
    /// A failed response carrying `message`.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            token: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawAuthResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl From<RawAuthResponse> for AuthResponse {
    fn from(raw: RawAuthResponse) -> Self {
        Self {
            token: raw.token.filter(|t| !t.is_empty()).map(SecretString::from),
            error: raw.error.filter(|e| !e.is_empty()),
        }
    }
}
