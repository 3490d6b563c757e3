//! `reqwest`-based client for the storefront backend.

use std::sync::Arc;

use infpro_core::{Product, Review};
use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};
use url::Url;

use super::cache::{CacheKey, CacheValue};
use super::{ApiError, AuthResponse, RawAuthResponse};
use crate::config::ApiConfig;

const PRODUCTS_PATH: &str = "/api/products";
const REVIEWS_PATH: &str = "/api/reviews";
const REGISTER_PATH: &str = "/api/auth/register";
const LOGIN_PATH: &str = "/api/auth/login";

/// Longest slice of an error body kept in [`ApiError::Status`].
const ERROR_BODY_LIMIT: usize = 200;

// =============================================================================
// StorefrontApi
// =============================================================================

/// Client for the storefront backend.
///
/// Cheap to clone; clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct StorefrontApi {
    inner: Arc<StorefrontApiInner>,
}

struct StorefrontApiInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Option<Cache<CacheKey, CacheValue>>,
}

impl std::fmt::Debug for StorefrontApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontApi")
            .field("base_url", &self.inner.base_url.as_str())
            .field("cached", &self.inner.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl StorefrontApi {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("infpro-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let cache = (!config.cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(16)
                .time_to_live(config.cache_ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(StorefrontApiInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// Resolve an `/api/...` path against the base URL.
    ///
    /// The path is appended to the base as-is, so a base of
    /// `https://host/shop` serves `https://host/shop/api/products`.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// GET `path` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            debug!(
                body = %body.chars().take(ERROR_BODY_LIMIT).collect::<String>(),
                "Unexpected response body"
            );
            ApiError::Parse(e)
        })
    }

    async fn cached(&self, key: CacheKey) -> Option<CacheValue> {
        match &self.inner.cache {
            Some(cache) => cache.get(&key).await,
            None => None,
        }
    }

    async fn remember(&self, key: CacheKey, value: CacheValue) {
        if let Some(cache) = &self.inner.cache {
            cache.insert(key, value).await;
        }
    }

    /// Drop all cached responses.
    pub fn invalidate_cache(&self) {
        if let Some(cache) = &self.inner.cache {
            cache.invalidate_all();
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the product catalog.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the backend answers with a
    /// non-success status, or the body is not a product list.
    #[instrument(skip(self))]
    pub async fn try_products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Products(products)) = self.cached(CacheKey::Products).await {
            debug!(count = products.len(), "Products served from cache");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json(PRODUCTS_PATH).await?;
        debug!(count = products.len(), "Products fetched");
        self.remember(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Fetch the product catalog, or an empty list if that fails.
    pub async fn products(&self) -> Vec<Product> {
        self.try_products().await.unwrap_or_else(|e| {
            error!(error = %e, "Failed to fetch products");
            Vec::new()
        })
    }

    /// Fetch customer reviews.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the backend answers with a
    /// non-success status, or the body is not a review list.
    #[instrument(skip(self))]
    pub async fn try_reviews(&self) -> Result<Vec<Review>, ApiError> {
        if let Some(CacheValue::Reviews(reviews)) = self.cached(CacheKey::Reviews).await {
            debug!(count = reviews.len(), "Reviews served from cache");
            return Ok(reviews);
        }

        let reviews: Vec<Review> = self.get_json(REVIEWS_PATH).await?;
        debug!(count = reviews.len(), "Reviews fetched");
        self.remember(CacheKey::Reviews, CacheValue::Reviews(reviews.clone()))
            .await;
        Ok(reviews)
    }

    /// Fetch customer reviews, or an empty list if that fails.
    pub async fn reviews(&self) -> Vec<Review> {
        self.try_reviews().await.unwrap_or_else(|e| {
            error!(error = %e, "Failed to fetch reviews");
            Vec::new()
        })
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Submit registration form fields.
    #[instrument(skip_all)]
    pub async fn register<B: Serialize + ?Sized>(&self, fields: &B) -> AuthResponse {
        self.post_auth(REGISTER_PATH, fields).await
    }

    /// Submit login form fields.
    #[instrument(skip_all)]
    pub async fn login<B: Serialize + ?Sized>(&self, fields: &B) -> AuthResponse {
        self.post_auth(LOGIN_PATH, fields).await
    }

    /// POST `fields` and read `{token}` / `{error}` from the body whatever
    /// the status code. Transport and decoding failures become an
    /// [`AuthResponse`] carrying the error text.
    async fn post_auth<B: Serialize + ?Sized>(&self, path: &str, fields: &B) -> AuthResponse {
        let result = async {
            let url = self.endpoint(path)?;
            let response = self.inner.client.post(url).json(fields).send().await?;
            let status = response.status();
            let body = response.text().await?;
            debug!(status = %status, "Auth response received");
            Ok::<_, ApiError>(serde_json::from_str::<RawAuthResponse>(&body)?)
        }
        .await;

        match result {
            Ok(raw) => raw.into(),
            Err(e) => {
                warn!(error = %e, path, "Auth request failed");
                AuthResponse::failed(e.to_string())
            }
        }
    }
}
