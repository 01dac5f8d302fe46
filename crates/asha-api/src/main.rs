//! ASHA Data-Collection API Server binary

use asha_api::{app, AppConfig, AppState, Store};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "asha_api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ASHA data-collection API server");

    let config = AppConfig::default();

    // Connect to database and ensure the schema exists
    let store = Store::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    info!("Connected to database");

    let addr = config.bind_addr.clone();
    let state = Arc::new(AppState { store, config });
    let app = app(state);

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
