//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Error-to-response mapping

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use stockfarm_core::alerts::AlertParams;
use stockfarm_core::replenishment::ReplenishmentParams;
use stockfarm_shared::{JwtService, ReplenishmentConfig};

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Replenishment/alert tunables loaded from configuration.
    pub replenishment: ReplenishmentConfig,
}

impl AppState {
    /// Calculator parameters derived from configuration.
    #[must_use]
    pub fn replenishment_params(&self) -> ReplenishmentParams {
        ReplenishmentParams {
            service_level_z: self.replenishment.service_level_z,
            default_shelf_life_days: self.replenishment.default_shelf_life_days,
        }
    }

    /// Alert emitter parameters derived from configuration.
    #[must_use]
    pub fn alert_params(&self) -> AlertParams {
        AlertParams {
            expiry_alert_days: self.replenishment.expiry_alert_days,
            replenishment: self.replenishment_params(),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
