//! Repositorio de vehículos en memoria
//!
//! Único dueño del estado de la flota. Los registros son inmutables y se
//! reemplazan completos al confirmar una mutación, así las lecturas nunca
//! observan un vehículo a medio actualizar.
//!
//! `update_mileage` y `delete` sobre un mismo id se serializan con un
//! mutex por vehículo; las lecturas solo toman el `RwLock` del mapa.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{debug, info};

use crate::models::maintenance_alert::MaintenanceAlert;
use crate::models::vehicle::Vehicle;
use crate::services::alert_classifier::AlertClassifier;
use crate::services::mileage_policy::MileagePolicy;
use crate::utils::errors::{FleetError, FleetResult};
use crate::utils::validation::{normalize_plate, validate_plate, validate_vehicle_id};

/// Registro almacenado: el vehículo más su orden de inserción
#[derive(Debug)]
struct StoredVehicle {
    seq: u64,
    vehicle: Vehicle,
}

pub struct VehicleRepository {
    vehicles: RwLock<HashMap<String, Arc<StoredVehicle>>>,
    // Solo hay entradas para ids con operaciones en curso
    vehicle_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    next_seq: AtomicU64,
    classifier: AlertClassifier,
    revision: watch::Sender<u64>,
}

impl Default for VehicleRepository {
    fn default() -> Self {
        Self::new(AlertClassifier::default())
    }
}

impl VehicleRepository {
    pub fn new(classifier: AlertClassifier) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            vehicles: RwLock::new(HashMap::new()),
            vehicle_locks: Mutex::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
            classifier,
            revision,
        }
    }

    /// Suscribirse a las revisiones confirmadas del repositorio
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Revisión actual (número de mutaciones confirmadas)
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub async fn create(
        &self,
        id: &str,
        plate: &str,
        model: &str,
        initial_mileage: i64,
    ) -> FleetResult<Vehicle> {
        let id = id.trim();
        let plate = normalize_plate(plate);
        let model = model.trim();

        validate_vehicle_id(id)?;
        validate_plate(&plate)?;
        MileagePolicy::validate_reading(initial_mileage)?;

        let mut vehicles = self.vehicles.write().await;

        if vehicles.contains_key(id) {
            return Err(FleetError::DuplicateId(id.to_string()));
        }
        if vehicles.values().any(|stored| stored.vehicle.plate == plate) {
            return Err(FleetError::DuplicatePlate(plate));
        }

        let vehicle = Vehicle::new(id.to_string(), plate, model.to_string(), initial_mileage, Utc::now());
        let stored = StoredVehicle {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            vehicle: vehicle.clone(),
        };
        vehicles.insert(id.to_string(), Arc::new(stored));
        drop(vehicles);

        self.bump_revision();
        info!("🚗 Vehículo registrado: {} ({}) con {} km", vehicle.id, vehicle.plate, initial_mileage);
        Ok(vehicle)
    }

    pub async fn get(&self, id: &str) -> FleetResult<Vehicle> {
        self.vehicles
            .read()
            .await
            .get(id)
            .map(|stored| stored.vehicle.clone())
            .ok_or_else(|| FleetError::NotFound(id.to_string()))
    }

    /// Listar vehículos en orden de registro
    pub async fn list(&self) -> Vec<Vehicle> {
        let mut ordered: Vec<Arc<StoredVehicle>> = self.vehicles.read().await.values().cloned().collect();
        ordered.sort_by_key(|stored| stored.seq);
        ordered.into_iter().map(|stored| stored.vehicle.clone()).collect()
    }

    /// Alertas de un vehículo en orden de creación
    pub async fn alerts(&self, id: &str) -> FleetResult<Vec<MaintenanceAlert>> {
        self.get(id).await.map(|vehicle| vehicle.alerts)
    }

    pub async fn update_mileage(&self, id: &str, new_mileage: i64) -> FleetResult<Vehicle> {
        let lock = self.vehicle_lock(id).await;
        let result = {
            let _guard = lock.lock().await;
            self.apply_mileage(id, new_mileage).await
        };
        self.release_lock(id, lock).await;
        result
    }

    pub async fn delete(&self, id: &str) -> FleetResult<()> {
        let lock = self.vehicle_lock(id).await;
        let result = {
            let _guard = lock.lock().await;
            self.remove_vehicle(id).await
        };
        self.release_lock(id, lock).await;
        result
    }

    async fn apply_mileage(&self, id: &str, new_mileage: i64) -> FleetResult<Vehicle> {
        let current = self
            .vehicles
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| FleetError::NotFound(id.to_string()))?;

        let old_mileage = current.vehicle.current_mileage;
        MileagePolicy::validate(old_mileage, new_mileage)?;

        let now = Utc::now();
        let new_alerts = self.classifier.classify(
            id,
            old_mileage,
            new_mileage,
            current.vehicle.has_critical_alert(),
            now,
        );

        let mut vehicle = current.vehicle.clone();
        vehicle.current_mileage = new_mileage;
        vehicle.updated_at = now;
        let generated = new_alerts.len();
        vehicle.alerts.extend(new_alerts);

        let stored = StoredVehicle {
            seq: current.seq,
            vehicle: vehicle.clone(),
        };
        self.vehicles.write().await.insert(id.to_string(), Arc::new(stored));

        self.bump_revision();
        info!(
            "📊 Kilometraje actualizado: {} {} → {} km ({} alertas nuevas)",
            id, old_mileage, new_mileage, generated
        );
        Ok(vehicle)
    }

    async fn remove_vehicle(&self, id: &str) -> FleetResult<()> {
        let removed = self
            .vehicles
            .write()
            .await
            .remove(id)
            .ok_or_else(|| FleetError::NotFound(id.to_string()))?;

        self.bump_revision();
        info!(
            "🗑️ Vehículo eliminado: {} ({} alertas eliminadas)",
            id,
            removed.vehicle.alerts.len()
        );
        Ok(())
    }

    async fn vehicle_lock(&self, id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.vehicle_locks.lock().await;
        locks.entry(id.to_string()).or_default().clone()
    }

    // Quitar la entrada si nadie más la retiene (la tabla + `lock`)
    async fn release_lock(&self, id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.vehicle_locks.lock().await;
        if Arc::strong_count(&lock) == 2 && locks.get(id).is_some_and(|entry| Arc::ptr_eq(entry, &lock)) {
            locks.remove(id);
        }
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|revision| *revision += 1);
        debug!("🔄 Revisión del repositorio: {}", self.revision());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::maintenance_alert::AlertType;
    use crate::services::mileage_policy::MAX_MILEAGE_KM;

    async fn repository_with(id: &str, plate: &str, mileage: i64) -> VehicleRepository {
        let repo = VehicleRepository::default();
        repo.create(id, plate, "Chevrolet NPR", mileage).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_create_starts_without_alerts() {
        let repo = VehicleRepository::default();
        let vehicle = repo.create("V-001", "abc-123", "  Hino 300 ", 12_000).await.unwrap();

        assert_eq!(vehicle.plate, "ABC-123");
        assert_eq!(vehicle.model, "Hino 300");
        assert_eq!(vehicle.current_mileage, 12_000);
        assert_eq!(vehicle.initial_mileage, 12_000);
        assert!(vehicle.alerts.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_formats() {
        let repo = VehicleRepository::default();

        assert!(matches!(
            repo.create("001", "ABC-123", "NPR", 0).await,
            Err(FleetError::InvalidFormat { field: "id", .. })
        ));
        assert!(matches!(
            repo.create("V-001", "ABC123", "NPR", 0).await,
            Err(FleetError::InvalidFormat { field: "plate", .. })
        ));
        assert_eq!(repo.create("V-001", "ABC-123", "NPR", -1).await, Err(FleetError::Negative(-1)));
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicates_do_not_mutate() {
        let repo = repository_with("V-001", "ABC-123", 1_000).await;
        let revision = repo.revision();

        assert_eq!(
            repo.create("V-001", "XYZ-999", "NPR", 0).await,
            Err(FleetError::DuplicateId("V-001".into()))
        );
        assert_eq!(
            repo.create("V-002", "abc-123", "NPR", 0).await,
            Err(FleetError::DuplicatePlate("ABC-123".into()))
        );

        assert_eq!(repo.list().await.len(), 1);
        assert_eq!(repo.revision(), revision);
    }

    #[tokio::test]
    async fn test_get_is_idempotent() {
        let repo = repository_with("V-001", "ABC-123", 1_000).await;
        repo.update_mileage("V-001", 25_000).await.unwrap();

        let first = repo.get("V-001").await.unwrap();
        let second = repo.get("V-001").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_update_mileage_appends_alerts() {
        let repo = repository_with("V-001", "ABC-123", 9_500).await;
        let vehicle = repo.update_mileage("V-001", 31_200).await.unwrap();

        assert_eq!(vehicle.current_mileage, 31_200);
        assert_eq!(vehicle.initial_mileage, 9_500);
        let basic: Vec<i64> = vehicle.alerts_of_type(AlertType::Basic).map(|a| a.mileage).collect();
        assert_eq!(basic, vec![10_000, 20_000, 30_000]);
        assert_eq!(vehicle.alerts_of_type(AlertType::Major).count(), 0);

        let vehicle = repo.update_mileage("V-001", 40_000).await.unwrap();
        assert_eq!(vehicle.alerts.len(), 4);
        assert_eq!(vehicle.alerts[3].mileage, 40_000);
    }

    #[tokio::test]
    async fn test_non_increasing_leaves_state_unchanged() {
        let repo = repository_with("V-001", "ABC-123", 20_000).await;
        let before = repo.get("V-001").await.unwrap();

        assert_eq!(
            repo.update_mileage("V-001", 20_000).await,
            Err(FleetError::NonIncreasing { current: 20_000, proposed: 20_000 })
        );
        assert_eq!(
            repo.update_mileage("V-001", 5_000).await,
            Err(FleetError::NonIncreasing { current: 20_000, proposed: 5_000 })
        );
        assert_eq!(repo.update_mileage("V-001", -3).await, Err(FleetError::Negative(-3)));

        assert_eq!(repo.get("V-001").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_threshold_union_and_one_shot_critical() {
        let repo = repository_with("V-001", "ABC-123", 95_000).await;

        let vehicle = repo.update_mileage("V-001", 100_050).await.unwrap();
        let types: Vec<AlertType> = vehicle.alerts.iter().map(|a| a.alert_type).collect();
        assert_eq!(types, vec![AlertType::Basic, AlertType::Major, AlertType::Critical]);
        assert!(vehicle.alerts.iter().all(|a| a.mileage == 100_000));

        repo.update_mileage("V-001", 150_000).await.unwrap();
        let vehicle = repo.update_mileage("V-001", 200_000).await.unwrap();
        assert_eq!(vehicle.alerts_of_type(AlertType::Critical).count(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_vehicle() {
        let repo = VehicleRepository::default();
        assert_eq!(
            repo.update_mileage("V-404", 1_000).await,
            Err(FleetError::NotFound("V-404".into()))
        );
    }

    #[tokio::test]
    async fn test_delete_cascades_alerts() {
        let repo = repository_with("V-001", "ABC-123", 0).await;
        let vehicle = repo.update_mileage("V-001", 60_000).await.unwrap();
        assert_eq!(vehicle.alerts.len(), 7);

        repo.delete("V-001").await.unwrap();

        assert_eq!(repo.get("V-001").await, Err(FleetError::NotFound("V-001".into())));
        assert_eq!(repo.alerts("V-001").await, Err(FleetError::NotFound("V-001".into())));
        assert_eq!(repo.delete("V-001").await, Err(FleetError::NotFound("V-001".into())));

        // El id y la placa quedan libres
        let recreated = repo.create("V-001", "ABC-123", "NPR", 0).await.unwrap();
        assert!(recreated.alerts.is_empty());
    }

    #[tokio::test]
    async fn test_list_keeps_registration_order() {
        let repo = VehicleRepository::default();
        for (id, plate) in [("V-003", "CCC-333"), ("V-001", "AAA-111"), ("V-002", "BBB-222")] {
            repo.create(id, plate, "NPR", 0).await.unwrap();
        }
        repo.update_mileage("V-003", 10).await.unwrap();

        let ids: Vec<String> = repo.list().await.into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["V-003", "V-001", "V-002"]);
    }

    #[tokio::test]
    async fn test_revision_counts_commits() {
        let repo = VehicleRepository::default();
        let mut revisions = repo.subscribe();
        assert_eq!(*revisions.borrow(), 0);

        repo.create("V-001", "ABC-123", "NPR", 0).await.unwrap();
        revisions.changed().await.unwrap();
        assert_eq!(*revisions.borrow_and_update(), 1);

        let _ = repo.update_mileage("V-001", 0).await;
        assert_eq!(repo.revision(), 1);

        repo.update_mileage("V-001", 1).await.unwrap();
        repo.delete("V-001").await.unwrap();
        assert_eq!(repo.revision(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_serialized() {
        let repo = Arc::new(repository_with("V-001", "ABC-123", 0).await);

        let handles: Vec<_> = (1..=20)
            .map(|step| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.update_mileage("V-001", step * 10_000).await })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                accepted += 1;
            }
        }

        let vehicle = repo.get("V-001").await.unwrap();
        assert!(accepted >= 1);
        assert_eq!(vehicle.current_mileage, 200_000);
        // Cada múltiplo de 10,000 se alerta una sola vez sin importar el orden
        assert_eq!(vehicle.alerts_of_type(AlertType::Basic).count(), 20);
        assert_eq!(vehicle.alerts_of_type(AlertType::Major).count(), 4);
        assert_eq!(vehicle.alerts_of_type(AlertType::Critical).count(), 1);
        assert!(repo.vehicle_locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_lock_table_does_not_grow_on_unknown_ids() {
        let repo = VehicleRepository::default();
        for i in 0..500 {
            let id = format!("missing-{}", i);
            assert!(repo.update_mileage(&id, 1_000).await.is_err());
            assert!(repo.delete(&id).await.is_err());
        }
        assert!(repo.vehicle_locks.lock().await.is_empty());

        repo.create("V-001", "ABC-123", "NPR", 0).await.unwrap();
        repo.update_mileage("V-001", 10_000).await.unwrap();
        repo.delete("V-001").await.unwrap();
        assert!(repo.vehicle_locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_mileage_above_maximum_is_rejected() {
        let repo = VehicleRepository::default();
        assert_eq!(
            repo.create("V-001", "ABC-123", "NPR", i64::MAX - 5).await,
            Err(FleetError::OutOfRange { value: i64::MAX - 5, max: MAX_MILEAGE_KM })
        );
        assert!(repo.list().await.is_empty());

        repo.create("V-001", "ABC-123", "NPR", MAX_MILEAGE_KM - 1).await.unwrap();
        assert_eq!(
            repo.update_mileage("V-001", i64::MAX).await,
            Err(FleetError::OutOfRange { value: i64::MAX, max: MAX_MILEAGE_KM })
        );

        // El máximo es una lectura válida
        let vehicle = repo.update_mileage("V-001", MAX_MILEAGE_KM).await.unwrap();
        assert_eq!(vehicle.current_mileage, MAX_MILEAGE_KM);
        assert_eq!(vehicle.alerts_of_type(AlertType::Critical).count(), 1);
    }

    #[tokio::test]
    async fn test_registered_above_threshold_gets_critical_on_first_update() {
        let repo = repository_with("V-001", "ABC-123", 120_000).await;
        assert_eq!(repo.get("V-001").await.unwrap().alert_count(), 0);

        let vehicle = repo.update_mileage("V-001", 125_000).await.unwrap();
        let alerts: Vec<(AlertType, i64)> = vehicle.alerts.iter().map(|a| (a.alert_type, a.mileage)).collect();
        assert_eq!(alerts, vec![(AlertType::Critical, 125_000)]);

        let vehicle = repo.update_mileage("V-001", 130_000).await.unwrap();
        assert_eq!(vehicle.alerts_of_type(AlertType::Critical).count(), 1);
        assert_eq!(vehicle.alerts.last().map(|a| (a.alert_type, a.mileage)), Some((AlertType::Basic, 130_000)));
    }
}
