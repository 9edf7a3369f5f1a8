//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables son opcionales; los valores por defecto corresponden
//! al servidor local que espera el cliente web (`http://127.0.0.1:8000`).

use std::env;
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    /// Vacío = CORS permisivo en desarrollo, sin orígenes cruzados fuera de él
    pub cors_origins: Vec<String>,
    /// 0 desactiva el rate limiting
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub log_level: Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: Vec::new(),
            rate_limit_requests: 120,
            rate_limit_window: 60,
            log_level: Level::INFO,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración a partir de una función de búsqueda
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", "port number", defaults.port)?,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            rate_limit_requests: parse_var(&lookup, "RATE_LIMIT_REQUESTS", "number", defaults.rate_limit_requests)?,
            rate_limit_window: parse_var(&lookup, "RATE_LIMIT_WINDOW", "number of seconds", defaults.rate_limit_window)?,
            log_level: parse_var(&lookup, "LOG_LEVEL", "log level", defaults.log_level)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, expected, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server_url(), "127.0.0.1:8000");
        assert!(config.is_development());
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_overrides() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("CORS_ORIGINS", "http://localhost:5500, https://flota.example.com,"),
            ("RATE_LIMIT_REQUESTS", "0"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert!(!config.is_development());
        assert_eq!(config.server_url(), "0.0.0.0:9000");
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:5500".to_string(), "https://flota.example.com".to_string()]
        );
        assert_eq!(config.rate_limit_requests, 0);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = EnvironmentConfig::from_lookup(lookup_from(&[("PORT", "ochenta")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PORT",
                expected: "port number",
                value: "ochenta".to_string(),
            }
        );
    }
}
