//! Services module
//!
//! Este módulo contiene las reglas de negocio de mantenimiento:
//! la política de kilometraje y la clasificación de alertas.

pub mod alert_classifier;
pub mod mileage_policy;

pub use alert_classifier::AlertClassifier;
pub use mileage_policy::{MileageError, MileagePolicy, MAX_MILEAGE_KM};
