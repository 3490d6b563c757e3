//! Integration tests for the Infpro storefront client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p infpro-integration-tests
//! ```
//!
//! The tests need no external services: [`StubBackend`] serves the
//! storefront's `/api/*` endpoints from memory on an ephemeral port.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

/// In-memory stand-in for the storefront backend.
///
/// Aborts its server task when dropped.
pub struct StubBackend {
    addr: SocketAddr,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

struct StubState {
    products: Value,
    reviews: Value,
    catalog_down: bool,
    catalog_hits: AtomicUsize,
    next_token: AtomicUsize,
    accounts: Mutex<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct Credentials {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl StubBackend {
    /// Backend serving `products` and `reviews`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start(products: Value, reviews: Value) -> Self {
        Self::spawn(StubState {
            products,
            reviews,
            catalog_down: false,
            catalog_hits: AtomicUsize::new(0),
            next_token: AtomicUsize::new(1),
            accounts: Mutex::new(HashMap::new()),
        })
        .await
    }

    /// Backend whose catalog and review endpoints answer 500.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start_failing() -> Self {
        Self::spawn(StubState {
            products: json!([]),
            reviews: json!([]),
            catalog_down: true,
            catalog_hits: AtomicUsize::new(0),
            next_token: AtomicUsize::new(1),
            accounts: Mutex::new(HashMap::new()),
        })
        .await
    }

    async fn spawn(state: StubState) -> Self {
        let state = Arc::new(state);
        let app = Router::new()
            .route("/api/products", get(products))
            .route("/api/reviews", get(reviews))
            .route("/api/auth/register", post(register))
            .route("/api/auth/login", post(login))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener.local_addr().expect("Stub backend has no address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Origin to use as `INFPRO_API_BASE`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of `GET /api/products` requests served.
    #[must_use]
    pub fn catalog_hits(&self) -> usize {
        self.state.catalog_hits.load(Ordering::SeqCst)
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn products(State(state): State<Arc<StubState>>) -> Response {
    state.catalog_hits.fetch_add(1, Ordering::SeqCst);
    if state.catalog_down {
        return (StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable").into_response();
    }
    Json(state.products.clone()).into_response()
}

async fn reviews(State(state): State<Arc<StubState>>) -> Response {
    if state.catalog_down {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(state.reviews.clone()).into_response()
}

fn issue_token(state: &StubState) -> String {
    format!("token-{}", state.next_token.fetch_add(1, Ordering::SeqCst))
}

async fn register(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Credentials>,
) -> (StatusCode, Json<Value>) {
    if body.email.is_empty() || body.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Email and password are required"})),
        );
    }
    let Ok(mut accounts) = state.accounts.lock() else {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
    };
    if accounts.contains_key(&body.email) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"error": "Email already registered"})),
        );
    }
    accounts.insert(body.email, body.password);
    (StatusCode::CREATED, Json(json!({"token": issue_token(&state)})))
}

async fn login(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Credentials>,
) -> (StatusCode, Json<Value>) {
    let valid = state
        .accounts
        .lock()
        .map(|accounts| accounts.get(&body.email) == Some(&body.password))
        .unwrap_or(false);
    if valid {
        (StatusCode::OK, Json(json!({"token": issue_token(&state)})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid credentials"})),
        )
    }
}
