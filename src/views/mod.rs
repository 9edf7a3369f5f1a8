//! Capa de vista
//!
//! Resúmenes de la flota derivados de consultas al repositorio o a la API.

pub mod fleet_view;

pub use fleet_view::{load_summary, AlertBadge, FleetSource, FleetSummary, FleetWatcher, VehicleCard};
