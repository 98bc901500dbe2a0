//! BMS Assistant API library
//!
//! CRUD backend for building-management-system documentation, with a chat
//! relay to Gemini and a dashboard summary.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod seed;
pub mod services;
pub mod tracing;

use axum::{http::HeaderValue, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

/// Every `/api` resource router, nested under its collection path.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/usuarios", handlers::usuarios::usuarios_routes())
        .nest("/sistemas", handlers::sistemas::sistemas_routes())
        .nest("/formatos", handlers::formatos::formatos_routes())
        .nest("/agentes", handlers::agentes::agentes_routes())
        .nest("/documentos", handlers::documentos::documentos_routes())
        .nest("/historial", handlers::historial::historial_routes())
        .nest("/metricas", handlers::metricas::metricas_routes())
        .nest("/dashboard", handlers::dashboard::dashboard_routes())
        .nest("/chat", handlers::chat::chat_routes())
        .nest("/ia", handlers::generacion::generacion_routes())
        .nest("/test", handlers::diagnostico::diagnostico_routes())
}

/// Builds the CORS layer: explicit origins when configured, otherwise
/// permissive if the configuration allows it. `None` means the
/// configuration is unusable.
pub fn cors_layer(cfg: &config::AppConfig) -> Option<CorsLayer> {
    let configured_origins: Option<Vec<HeaderValue>> = cfg
        .cors_allowed_origins
        .as_ref()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .filter_map(|origin| HeaderValue::from_str(origin).ok())
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    if let Some(origins) = configured_origins {
        Some(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
                .allow_credentials(cfg.cors_allow_credentials),
        )
    } else if cfg.should_allow_permissive_cors() {
        ::tracing::info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        Some(CorsLayer::permissive())
    } else {
        None
    }
}

/// The full application: health routes, `/api`, and the HTTP layers, bound
/// to `state`.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .merge(handlers::health::health_routes())
        .nest("/api", api_routes())
        .layer(tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state)
}

#[cfg(test)]
mod cors_tests {
    use super::*;

    fn config(environment: &str) -> config::AppConfig {
        config::AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            8080,
            environment.into(),
        )
    }

    #[test]
    fn development_falls_back_to_permissive() {
        assert!(cors_layer(&config("development")).is_some());
    }

    #[test]
    fn production_without_origins_is_rejected() {
        assert!(cors_layer(&config("production")).is_none());
    }

    #[test]
    fn production_with_origins_is_accepted() {
        let mut cfg = config("production");
        cfg.cors_allowed_origins = Some("https://bms.example.com, ".into());
        assert!(cors_layer(&cfg).is_some());
    }
}
