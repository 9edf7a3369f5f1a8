//! Vista de la flota
//!
//! Modelo de vista que reemplaza el renderizado del panel web: contadores,
//! tarjetas de vehículos con su insignia de alertas y etiquetas por tipo.
//! La vista consume resultados de consulta; nunca muta el repositorio.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::watch;

use crate::models::maintenance_alert::{AlertType, MaintenanceAlert};
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;

/// Insignia de alertas de una tarjeta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertBadge {
    Success,
    Warning,
    Error,
}

impl AlertBadge {
    /// 0 alertas → success, 1-2 → warning, 3 o más → error
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => AlertBadge::Success,
            1..=2 => AlertBadge::Warning,
            _ => AlertBadge::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleCard {
    pub id: String,
    pub plate: String,
    pub model: String,
    pub current_mileage: i64,
    pub alert_count: usize,
    pub badge: AlertBadge,
}

impl From<&Vehicle> for VehicleCard {
    fn from(vehicle: &Vehicle) -> Self {
        let alert_count = vehicle.alert_count();
        Self {
            id: vehicle.id.clone(),
            plate: vehicle.plate.clone(),
            model: vehicle.model.clone(),
            current_mileage: vehicle.current_mileage,
            alert_count,
            badge: AlertBadge::from_count(alert_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub total_vehicles: usize,
    pub total_alerts: usize,
    pub vehicles: Vec<VehicleCard>,
}

impl FleetSummary {
    pub fn from_vehicles(vehicles: &[Vehicle]) -> Self {
        Self {
            total_vehicles: vehicles.len(),
            total_alerts: vehicles.iter().map(Vehicle::alert_count).sum(),
            vehicles: vehicles.iter().map(VehicleCard::from).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

/// Línea de alerta lista para mostrar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertLine {
    pub alert_type: AlertType,
    pub label: &'static str,
    pub mileage: i64,
    pub timestamp: String,
}

impl From<&MaintenanceAlert> for AlertLine {
    fn from(alert: &MaintenanceAlert) -> Self {
        Self {
            alert_type: alert.alert_type,
            label: alert.alert_type.description(),
            mileage: alert.mileage,
            timestamp: alert.timestamp.to_rfc3339(),
        }
    }
}

/// Fuente de vehículos con alertas: el repositorio local o la API remota
#[async_trait]
pub trait FleetSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, Self::Error>;
}

#[async_trait]
impl FleetSource for VehicleRepository {
    type Error = Infallible;

    async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, Self::Error> {
        Ok(self.list().await)
    }
}

/// Cargar el resumen de la flota desde cualquier fuente
pub async fn load_summary<S: FleetSource + ?Sized>(source: &S) -> Result<FleetSummary, S::Error> {
    let vehicles = source.fetch_vehicles().await?;
    Ok(FleetSummary::from_vehicles(&vehicles))
}

/// Observa las revisiones del repositorio y recalcula el resumen tras cada commit
pub struct FleetWatcher {
    repository: Arc<VehicleRepository>,
    revisions: watch::Receiver<u64>,
}

impl FleetWatcher {
    pub fn new(repository: Arc<VehicleRepository>) -> Self {
        let revisions = repository.subscribe();
        Self { repository, revisions }
    }

    /// Resumen del estado actual, marcando la revisión como vista
    pub async fn current(&mut self) -> FleetSummary {
        let _ = self.revisions.borrow_and_update();
        FleetSummary::from_vehicles(&self.repository.list().await)
    }

    /// Esperar el próximo commit y devolver el resumen resultante
    pub async fn next(&mut self) -> Option<FleetSummary> {
        self.revisions.changed().await.ok()?;
        Some(self.current().await)
    }
}
