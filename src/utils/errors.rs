//! Sistema de manejo de errores
//!
//! Este módulo define los errores del dominio de flota (`FleetError`)
//! y su conversión a respuestas HTTP apropiadas (`AppError`).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::services::mileage_policy::MileageError;

/// Errores del dominio - cada operación del repositorio falla con exactamente uno
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FleetError {
    #[error("Vehicle '{0}' not found")]
    NotFound(String),

    #[error("Vehicle id '{0}' already exists")]
    DuplicateId(String),

    #[error("Plate '{0}' already exists")]
    DuplicatePlate(String),

    #[error("Invalid {field} format: '{value}'")]
    InvalidFormat { field: &'static str, value: String },

    #[error("New mileage {proposed} must be greater than current mileage {current}")]
    NonIncreasing { current: i64, proposed: i64 },

    #[error("Mileage cannot be negative: {0}")]
    Negative(i64),

    #[error("Mileage {value} exceeds the maximum of {max} km")]
    OutOfRange { value: i64, max: i64 },
}

impl From<MileageError> for FleetError {
    fn from(err: MileageError) -> Self {
        match err {
            MileageError::NonIncreasing { current, proposed } => FleetError::NonIncreasing { current, proposed },
            MileageError::Negative(value) => FleetError::Negative(value),
            MileageError::OutOfRange { value, max } => FleetError::OutOfRange { value, max },
        }
    }
}

impl FleetError {
    /// Código estable para clientes
    pub fn code(&self) -> &'static str {
        match self {
            FleetError::NotFound(_) => "NOT_FOUND",
            FleetError::DuplicateId(_) => "DUPLICATE_ID",
            FleetError::DuplicatePlate(_) => "DUPLICATE_PLATE",
            FleetError::InvalidFormat { .. } => "INVALID_FORMAT",
            FleetError::NonIncreasing { .. } => "NON_INCREASING_MILEAGE",
            FleetError::Negative(_) => "NEGATIVE_MILEAGE",
            FleetError::OutOfRange { .. } => "MILEAGE_OUT_OF_RANGE",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            FleetError::NotFound(_) => StatusCode::NOT_FOUND,
            FleetError::DuplicateId(_) | FleetError::DuplicatePlate(_) => StatusCode::CONFLICT,
            FleetError::InvalidFormat { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            FleetError::NonIncreasing { .. } | FleetError::Negative(_) | FleetError::OutOfRange { .. } => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

/// Errores principales de la aplicación (capa HTTP)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Respuesta de error para la API
///
/// `detail` es el mensaje que muestra el cliente web.
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    detail: String,
    error: String,
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Fleet(e) => {
                warn!("⚠️ Operación de flota rechazada: {}", e);
                let status = e.status();
                (
                    status,
                    ErrorResponse {
                        detail: e.to_string(),
                        error: status.canonical_reason().unwrap_or("Error").to_string(),
                        code: e.code().to_string(),
                        details: None,
                    },
                )
            }

            AppError::Validation(e) => {
                warn!("⚠️ Validation error: {}", e);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        detail: "The provided data is invalid".to_string(),
                        error: "Validation Error".to_string(),
                        code: "VALIDATION_ERROR".to_string(),
                        details: Some(json!(e)),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                warn!("⚠️ Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        detail: msg,
                        error: "Bad Request".to_string(),
                        code: "BAD_REQUEST".to_string(),
                        details: None,
                    },
                )
            }

            AppError::RateLimitExceeded => {
                warn!("⚠️ Rate limit exceeded");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    ErrorResponse {
                        detail: "Too many requests. Please try again later".to_string(),
                        error: "Rate Limit Exceeded".to_string(),
                        code: "RATE_LIMIT_EXCEEDED".to_string(),
                        details: None,
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones del dominio
pub type FleetResult<T> = Result<T, FleetError>;

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
