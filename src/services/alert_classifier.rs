//! Clasificador de alertas de mantenimiento
//!
//! Deriva las alertas nuevas de un intervalo de kilometraje (old, new]:
//! - BASIC: cada múltiplo de 10,000 km cruzado
//! - MAJOR: cada múltiplo de 50,000 km cruzado
//! - CRITICAL: una sola vez, al alcanzar 100,000 km
//!
//! El historial de alertas del vehículo llega como parámetro explícito
//! (`has_critical`); el clasificador no guarda estado.

use chrono::{DateTime, Utc};

use crate::models::maintenance_alert::{AlertType, MaintenanceAlert};

pub const BASIC_INTERVAL_KM: i64 = 10_000;
pub const MAJOR_INTERVAL_KM: i64 = 50_000;
pub const CRITICAL_THRESHOLD_KM: i64 = 100_000;

/// Disparo de una regla antes de convertirse en alerta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertTrigger {
    pub alert_type: AlertType,
    pub mileage: i64,
}

/// Umbrales del clasificador
#[derive(Debug, Clone)]
pub struct AlertClassifier {
    pub basic_interval: i64,
    pub major_interval: i64,
    pub critical_threshold: i64,
}

impl Default for AlertClassifier {
    fn default() -> Self {
        Self {
            basic_interval: BASIC_INTERVAL_KM,
            major_interval: MAJOR_INTERVAL_KM,
            critical_threshold: CRITICAL_THRESHOLD_KM,
        }
    }
}

impl AlertClassifier {
    /// Calcular los disparos del intervalo (old, new], ordenados por
    /// kilometraje y luego BASIC < MAJOR < CRITICAL
    pub fn triggers(&self, old_mileage: i64, new_mileage: i64, has_critical: bool) -> Vec<AlertTrigger> {
        if new_mileage <= old_mileage {
            return Vec::new();
        }

        let mut triggers: Vec<AlertTrigger> = Vec::new();

        triggers.extend(
            multiples_crossed(old_mileage, new_mileage, self.basic_interval)
                .map(|mileage| AlertTrigger { alert_type: AlertType::Basic, mileage }),
        );
        triggers.extend(
            multiples_crossed(old_mileage, new_mileage, self.major_interval)
                .map(|mileage| AlertTrigger { alert_type: AlertType::Major, mileage }),
        );

        if !has_critical && new_mileage >= self.critical_threshold {
            // Vehículos registrados por encima del umbral nunca lo cruzan:
            // se registra la primera lectura observada.
            let mileage = if old_mileage < self.critical_threshold {
                self.critical_threshold
            } else {
                new_mileage
            };
            triggers.push(AlertTrigger { alert_type: AlertType::Critical, mileage });
        }

        triggers.sort_by_key(|t| (t.mileage, t.alert_type));
        triggers
    }

    /// Generar las alertas nuevas para un vehículo, todas con el mismo timestamp
    pub fn classify(
        &self,
        vehicle_id: &str,
        old_mileage: i64,
        new_mileage: i64,
        has_critical: bool,
        at: DateTime<Utc>,
    ) -> Vec<MaintenanceAlert> {
        self.triggers(old_mileage, new_mileage, has_critical)
            .into_iter()
            .map(|t| MaintenanceAlert::new(vehicle_id, t.alert_type, t.mileage, at))
            .collect()
    }
}

/// Múltiplos de `step` dentro de (old, new]; vacío si el siguiente
/// múltiplo no cabe en un i64
fn multiples_crossed(old_mileage: i64, new_mileage: i64, step: i64) -> impl Iterator<Item = i64> {
    let first = if step > 0 {
        old_mileage
            .div_euclid(step)
            .checked_add(1)
            .and_then(|k| k.checked_mul(step))
    } else {
        None
    };
    let step = step.max(1);

    std::iter::successors(first, move |m| m.checked_add(step)).take_while(move |m| *m <= new_mileage)
}
