use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::Vehicle;

// Request para registrar un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 16))]
    pub id: String,
    #[validate(length(min = 1, max = 16))]
    pub plate: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    pub initial_mileage: i64,
}

// Request para actualizar kilometraje
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMileageRequest {
    pub new_mileage: i64,
}

// Response de vehículo recién creado (todavía sin alertas)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleResponse {
    pub id: String,
    pub plate: String,
    pub model: String,
    pub current_mileage: i64,
    pub initial_mileage: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            plate: vehicle.plate,
            model: vehicle.model,
            current_mileage: vehicle.current_mileage,
            initial_mileage: vehicle.initial_mileage,
            created_at: vehicle.created_at,
        }
    }
}

// Response del health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: DateTime<Utc>,
}
