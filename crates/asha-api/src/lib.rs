//! ASHA Data-Collection API Server
//!
//! Axum service in front of the SQLite record store: worker registration and
//! login, the five clinical form surfaces, reminder alerts, the dashboard
//! counts, and the offline-sync ingest endpoint.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use config::AppConfig;
pub use db::Store;

/// Application state shared across handlers
pub struct AppState {
    pub store: Store,
    pub config: AppConfig,
}

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = state.config.cors_layer();

    Router::new()
        // Health check
        .route("/health", get(routes::health_check))
        // Authentication
        .route("/api/register", post(routes::auth::register))
        .route("/api/login", post(routes::auth::login))
        // Clinical forms
        .route(
            "/api/family-surveys",
            post(routes::forms::create_family_survey).get(routes::forms::list_family_surveys),
        )
        .route(
            "/api/pregnancy-reports",
            post(routes::forms::create_pregnancy_report).get(routes::forms::list_pregnancy_reports),
        )
        .route(
            "/api/child-vaccinations",
            post(routes::forms::create_child_vaccination)
                .get(routes::forms::list_child_vaccinations),
        )
        .route(
            "/api/postnatal-care",
            post(routes::forms::create_postnatal_care).get(routes::forms::list_postnatal_care),
        )
        .route(
            "/api/leprosy-reports",
            post(routes::forms::create_leprosy_report).get(routes::forms::list_leprosy_reports),
        )
        // Alerts and dashboard
        .route("/api/alerts", get(routes::alerts::list_alerts))
        .route("/api/alerts/:id/read", put(routes::alerts::mark_alert_read))
        .route("/api/dashboard", get(routes::dashboard::get_dashboard_stats))
        // Offline sync
        .route("/api/sync", post(routes::sync::sync_offline_data))
        // CORS
        .layer(cors)
        // Tracing
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
