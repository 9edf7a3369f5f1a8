//! Cliente HTTP para la API de flota
//!
//! Wrapper tipado de los endpoints `/vehicles`. El manejo de respuestas es
//! el mismo que usa el panel web: los errores llevan el `detail` del backend
//! cuando existe y los 204 no tienen cuerpo.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleResponse};
use crate::models::maintenance_alert::MaintenanceAlert;
use crate::models::vehicle::Vehicle;
use crate::views::fleet_view::FleetSource;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Respuesta no exitosa del backend
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("Empty response body (status {0})")]
    EmptyBody(StatusCode),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(e) => e.status(),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::EmptyBody(status) => Some(*status),
        }
    }
}

/// Cliente HTTP para la API de flota
#[derive(Debug, Clone)]
pub struct FleetApiClient {
    client: Client,
    base_url: String,
}

impl Default for FleetApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl FleetApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /vehicles
    pub async fn get_all_vehicles(&self) -> Result<Vec<Vehicle>, ClientError> {
        let response = self.client.get(self.url("/vehicles")).send().await?;
        expect_body(response).await
    }

    /// GET /vehicles/{vehicle_id}
    pub async fn get_vehicle(&self, vehicle_id: &str) -> Result<Vehicle, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/vehicles/{}", vehicle_id)))
            .send()
            .await?;
        expect_body(response).await
    }

    /// POST /vehicles
    pub async fn create_vehicle(&self, request: &CreateVehicleRequest) -> Result<VehicleResponse, ClientError> {
        let response = self.client.post(self.url("/vehicles")).json(request).send().await?;
        expect_body(response).await
    }

    /// PUT /vehicles/{vehicle_id}/mileage
    pub async fn update_mileage(&self, vehicle_id: &str, new_mileage: i64) -> Result<Vehicle, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/vehicles/{}/mileage", vehicle_id)))
            .json(&json!({ "new_mileage": new_mileage }))
            .send()
            .await?;
        expect_body(response).await
    }

    /// DELETE /vehicles/{vehicle_id} - 204 No Content
    pub async fn delete_vehicle(&self, vehicle_id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/vehicles/{}", vehicle_id)))
            .send()
            .await?;
        handle_response::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// GET /vehicles/{vehicle_id}/alerts
    pub async fn get_vehicle_alerts(&self, vehicle_id: &str) -> Result<Vec<MaintenanceAlert>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/vehicles/{}/alerts", vehicle_id)))
            .send()
            .await?;
        expect_body(response).await
    }
}

#[async_trait]
impl FleetSource for FleetApiClient {
    type Error = ClientError;

    async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, Self::Error> {
        self.get_all_vehicles().await
    }
}

/// Manejo centralizado de respuestas HTTP
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ClientError> {
    let status = response.status();

    if !status.is_success() {
        let mut message = format!(
            "Error {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        );

        // Si no se puede parsear el error, usar mensaje por defecto
        if let Ok(body) = response.json::<serde_json::Value>().await {
            if let Some(detail) = body.get("detail").and_then(|d| d.as_str()) {
                message = detail.to_string();
            }
        }

        debug!("❌ API respondió {}: {}", status, message);
        return Err(ClientError::Api { status, message });
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    Ok(Some(response.json::<T>().await?))
}

async fn expect_body<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    handle_response(response).await?.ok_or(ClientError::EmptyBody(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = FleetApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/vehicles"), "http://localhost:8000/vehicles");
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(FleetApiClient::default().base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_api_error_display_is_detail() {
        let err = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            message: "Vehicle 'V-404' not found".to_string(),
        };
        assert_eq!(err.to_string(), "Vehicle 'V-404' not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }
}
