//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio de la flota:
//! vehículos y sus alertas de mantenimiento.

pub mod maintenance_alert;
pub mod vehicle;

pub use maintenance_alert::{AlertType, MaintenanceAlert};
pub use vehicle::Vehicle;
