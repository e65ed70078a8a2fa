//! Quota Gateway - Entry point.

use openai_client::OpenAiClient;
use quota_gateway::{
    api::{create_router, AppState},
    config::Config,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use usage_store::UsageStore;

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Quota Gateway");

    // Initialize storage
    let store = if config.store.persist {
        match UsageStore::open(config.store.path.clone()).await {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to open usage store: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        info!("Persistence disabled, using in-memory storage");
        UsageStore::memory()
    };

    // Initialize upstream client
    let upstream = match OpenAiClient::new(
        config.upstream.api_key.clone(),
        config.upstream.api_url.clone(),
        config.upstream.model.clone(),
        config.upstream.max_tokens,
        Duration::from_secs(config.upstream.timeout_secs),
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create upstream client: {}", e);
            std::process::exit(1);
        }
    };

    // Create application state and router
    let state = AppState::new(store, upstream, config.quota.amount_per_call);
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
