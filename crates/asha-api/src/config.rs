//! Application configuration

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Environment-driven server configuration.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub cors_origins: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:asha.db".to_string()),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "development-secret-change-in-production".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8001".to_string()),
            cors_origins: std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        }
    }
}

impl AppConfig {
    /// CORS layer for the configured origins: `*` allows any origin, anything
    /// else is a comma-separated allowlist. Methods and headers are open.
    pub fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        if self.cors_origins.trim() == "*" {
            layer.allow_origin(Any)
        } else {
            let origins: Vec<HeaderValue> = self
                .cors_origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            layer.allow_origin(AllowOrigin::list(origins))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_origin_lists() {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "secret".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            cors_origins: "https://app.example.org, https://staging.example.org".to_string(),
        };
        // Building the layer must not panic on a populated allowlist.
        let _ = config.cors_layer();
        let wildcard = AppConfig {
            cors_origins: "*".to_string(),
            ..config
        };
        let _ = wildcard.cors_layer();
    }
}
