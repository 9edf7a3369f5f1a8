//! Middleware de CORS
//!
//! Este módulo maneja la configuración de CORS para permitir
//! requests del panel web servido desde otro origen.

use http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

use crate::config::EnvironmentConfig;

/// Crear middleware de CORS a partir de la configuración
/// Sin orígenes configurados se permite cualquiera solo en desarrollo;
/// en otros entornos no se acepta ningún origen cruzado.
pub fn cors_middleware(config: &EnvironmentConfig) -> CorsLayer {
    match (config.cors_origins.is_empty(), config.is_development()) {
        (true, true) => CorsLayer::very_permissive(),
        (true, false) => cors_middleware_with_origins(&[]),
        (false, _) => cors_middleware_with_origins(&config.cors_origins),
    }
}

/// Crear middleware de CORS con orígenes específicos
pub fn cors_middleware_with_origins(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
        .max_age(std::time::Duration::from_secs(3600))
}
