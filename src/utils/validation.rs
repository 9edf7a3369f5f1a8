//! Utilidades de validación
//!
//! Formatos de identificadores de la flota. El núcleo los aplica,
//! no la capa de transporte.

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::errors::{FleetError, FleetResult};

lazy_static! {
    /// `V-` seguido de exactamente tres caracteres alfanuméricos
    static ref VEHICLE_ID_REGEX: Regex = Regex::new(r"^V-[A-Za-z0-9]{3}$").unwrap();
    /// Tres caracteres, guion, tres dígitos (ya en mayúsculas)
    static ref PLATE_REGEX: Regex = Regex::new(r"^[A-Z0-9]{3}-[0-9]{3}$").unwrap();
}

/// Validar formato de identificador de vehículo (V-XXX)
pub fn validate_vehicle_id(value: &str) -> FleetResult<()> {
    if !VEHICLE_ID_REGEX.is_match(value) {
        return Err(FleetError::InvalidFormat {
            field: "id",
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Normalizar placa: recortar espacios y pasar a mayúsculas
pub fn normalize_plate(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Validar formato de placa (XXX-123). Espera la placa ya normalizada.
pub fn validate_plate(value: &str) -> FleetResult<()> {
    if !PLATE_REGEX.is_match(value) {
        return Err(FleetError::InvalidFormat {
            field: "plate",
            value: value.to_string(),
        });
    }
    Ok(())
}
