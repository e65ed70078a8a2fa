//! HTTP API for the quota gateway.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use openai_client::OpenAiClient;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use usage_store::UsageStore;

/// Local development origins allowed to call the API.
const ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:3034",
    "http://127.0.0.1:3034",
];

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Usage record store
    pub store: UsageStore,
    /// Upstream chat completions client
    pub upstream: OpenAiClient,
    /// Quota amount deducted per allowed call
    pub increment: i64,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: UsageStore, upstream: OpenAiClient, increment: i64) -> Self {
        Self {
            store,
            upstream,
            increment,
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .map(|&origin| HeaderValue::from_static(origin))
        .collect();

    // Credentials are allowed, so the origin/method/header lists must
    // be explicit rather than wildcards.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/posts/",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
