//! Gestión de flota vehicular
//!
//! Servicio de mantenimiento de flota: registro de vehículos, actualización
//! de kilometraje, alertas de mantenimiento (BASIC / MAJOR / CRITICAL) y
//! eliminación, expuesto por HTTP y consumible con el cliente tipado.

pub mod client;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use middleware::cors::cors_middleware;
use middleware::rate_limit::rate_limit_middleware;
use state::AppState;

/// Construir el router completo de la API
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::vehicle_routes::create_vehicle_router())
        .merge(routes::fleet_routes::create_fleet_router())
        .layer(axum::middleware::from_fn_with_state(
            state.rate_limit.clone(),
            rate_limit_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware(&state.config))
        .with_state(state)
}
