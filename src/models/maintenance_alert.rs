//! Modelo de MaintenanceAlert
//!
//! Alertas de mantenimiento generadas al actualizar el kilometraje.
//! Pertenecen a un único vehículo y se eliminan junto con él.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Tipo de alerta - se serializa como BASIC / MAJOR / CRITICAL
///
/// El orden de las variantes es el orden de emisión cuando varias reglas
/// se disparan en el mismo kilometraje.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertType {
    Basic,
    Major,
    Critical,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Basic => "BASIC",
            AlertType::Major => "MAJOR",
            AlertType::Critical => "CRITICAL",
        }
    }

    /// Texto descriptivo mostrado en el listado de alertas
    pub fn description(&self) -> &'static str {
        match self {
            AlertType::Basic => "Mantenimiento Básico (cada 10,000 km)",
            AlertType::Major => "Mantenimiento Mayor (cada 50,000 km)",
            AlertType::Critical => "Umbral Crítico (≥100,000 km)",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alerta de mantenimiento - inmutable una vez creada
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceAlert {
    pub id: Uuid,
    pub vehicle_id: String,
    pub alert_type: AlertType,
    /// Kilometraje del umbral que disparó la alerta
    pub mileage: i64,
    pub timestamp: DateTime<Utc>,
}

impl MaintenanceAlert {
    pub fn new(vehicle_id: &str, alert_type: AlertType, mileage: i64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id: vehicle_id.to_string(),
            alert_type,
            mileage,
            timestamp,
        }
    }
}
