//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle tal como lo consume el cliente web:
//! datos del vehículo más su historial completo de alertas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::maintenance_alert::{AlertType, MaintenanceAlert};

/// Vehicle principal - mapea exactamente al JSON de `/vehicles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub plate: String,
    pub model: String,
    pub current_mileage: i64,
    pub initial_mileage: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Alertas en orden de creación
    #[serde(default)]
    pub alerts: Vec<MaintenanceAlert>,
}

impl Vehicle {
    /// Crear un vehículo recién registrado, sin alertas
    pub fn new(id: String, plate: String, model: String, initial_mileage: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            plate,
            model,
            current_mileage: initial_mileage,
            initial_mileage,
            created_at: now,
            updated_at: now,
            alerts: Vec::new(),
        }
    }

    /// Verificar si el vehículo ya recibió la alerta crítica (one-shot)
    pub fn has_critical_alert(&self) -> bool {
        self.alerts.iter().any(|a| a.alert_type == AlertType::Critical)
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    pub fn alerts_of_type(&self, alert_type: AlertType) -> impl Iterator<Item = &MaintenanceAlert> {
        self.alerts.iter().filter(move |a| a.alert_type == alert_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vehicle_starts_at_initial_mileage() {
        let now = Utc::now();
        let vehicle = Vehicle::new("V-001".into(), "ABC-123".into(), "Kenworth T800".into(), 42_000, now);

        assert_eq!(vehicle.current_mileage, 42_000);
        assert_eq!(vehicle.initial_mileage, 42_000);
        assert!(vehicle.alerts.is_empty());
        assert!(!vehicle.has_critical_alert());
    }

    #[test]
    fn test_has_critical_alert() {
        let now = Utc::now();
        let mut vehicle = Vehicle::new("V-001".into(), "ABC-123".into(), "Hino 300".into(), 0, now);
        vehicle.alerts.push(MaintenanceAlert::new("V-001", AlertType::Basic, 10_000, now));
        assert!(!vehicle.has_critical_alert());

        vehicle.alerts.push(MaintenanceAlert::new("V-001", AlertType::Critical, 100_000, now));
        assert!(vehicle.has_critical_alert());
        assert_eq!(vehicle.alerts_of_type(AlertType::Basic).count(), 1);
        assert_eq!(vehicle.alert_count(), 2);
    }

    #[test]
    fn test_vehicle_json_shape() {
        let now = Utc::now();
        let vehicle = Vehicle::new("V-001".into(), "ABC-123".into(), "NPR".into(), 500, now);
        let value = serde_json::to_value(&vehicle).unwrap();

        assert_eq!(value["id"], "V-001");
        assert_eq!(value["plate"], "ABC-123");
        assert_eq!(value["current_mileage"], 500);
        assert_eq!(value["initial_mileage"], 500);
        assert!(value["alerts"].as_array().unwrap().is_empty());
    }
}
