use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateMileageRequest, VehicleResponse};
use crate::models::maintenance_alert::MaintenanceAlert;
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/vehicles/:id", get(get_vehicle).delete(delete_vehicle))
        .route("/vehicles/:id/mileage", put(update_mileage))
        .route("/vehicles/:id/alerts", get(get_vehicle_alerts))
}

// JSON mal formado → 400 con el mismo cuerpo de error que el resto de la API
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| bad_request_error(&rejection.body_text()))
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VehicleResponse>), AppError> {
    let request = json_body(payload)?;
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.get_by_id(&id).await?;
    Ok(Json(response))
}

async fn update_mileage(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateMileageRequest>, JsonRejection>,
) -> Result<Json<Vehicle>, AppError> {
    let request = json_body(payload)?;
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.update_mileage(&id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    controller.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_vehicle_alerts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MaintenanceAlert>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.alerts(&id).await?;
    Ok(Json(response))
}
