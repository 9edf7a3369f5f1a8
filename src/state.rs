//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El repositorio es una instancia explícita,
//! no un singleton global.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;
use crate::repositories::vehicle_repository::VehicleRepository;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<VehicleRepository>,
    pub config: EnvironmentConfig,
    pub rate_limit: RateLimitState,
}

impl AppState {
    pub fn new(config: EnvironmentConfig) -> Self {
        Self::with_repository(config, Arc::new(VehicleRepository::default()))
    }

    pub fn with_repository(config: EnvironmentConfig, repository: Arc<VehicleRepository>) -> Self {
        Self {
            rate_limit: RateLimitState::new(&config),
            repository,
            config,
        }
    }
}
