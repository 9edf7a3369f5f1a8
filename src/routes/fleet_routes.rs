use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::HealthResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::views::fleet_view::FleetSummary;

pub fn create_fleet_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/fleet/summary", get(fleet_summary))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "fleet-maintenance".to_string(),
        timestamp: Utc::now(),
    })
}

async fn fleet_summary(State(state): State<AppState>) -> Result<Json<FleetSummary>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.summary().await?;
    Ok(Json(response))
}
