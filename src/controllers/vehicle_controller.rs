use std::sync::Arc;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateMileageRequest, VehicleResponse};
use crate::models::maintenance_alert::MaintenanceAlert;
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::views::fleet_view::FleetSummary;

pub struct VehicleController {
    repository: Arc<VehicleRepository>,
}

impl VehicleController {
    pub fn new(repository: Arc<VehicleRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<VehicleResponse, AppError> {
        request.validate()?;

        let vehicle = self
            .repository
            .create(&request.id, &request.plate, &request.model, request.initial_mileage)
            .await?;

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Vehicle, AppError> {
        Ok(self.repository.get(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        Ok(self.repository.list().await)
    }

    pub async fn update_mileage(&self, id: &str, request: UpdateMileageRequest) -> Result<Vehicle, AppError> {
        Ok(self.repository.update_mileage(id, request.new_mileage).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        Ok(())
    }

    pub async fn alerts(&self, id: &str) -> Result<Vec<MaintenanceAlert>, AppError> {
        Ok(self.repository.alerts(id).await?)
    }

    pub async fn summary(&self) -> Result<FleetSummary, AppError> {
        let vehicles = self.repository.list().await;
        Ok(FleetSummary::from_vehicles(&vehicles))
    }
}
