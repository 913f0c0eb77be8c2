use std::sync::Arc;
use tracing::info;

use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleResponse};
use crate::repositories::Store;
use crate::services::rules;
use crate::utils::errors::AppError;

pub struct VehicleController {
    store: Arc<dyn Store>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        person_id: i32,
        request: CreateVehicleRequest,
    ) -> Result<VehicleResponse, AppError> {
        let vehicle = self.store.add_vehicle(person_id, &request).await?;
        info!("🚗 Vehículo {} ({} {}) asignado a persona {}", vehicle.id, vehicle.color, vehicle.model, person_id);
        Ok(vehicle.into())
    }

    pub async fn list_by_person(&self, person_id: i32) -> Result<Vec<VehicleResponse>, AppError> {
        if self.store.find_person(person_id).await?.is_none() {
            return Err(rules::person_not_found());
        }

        let vehicles = self.store.vehicles_of(&[person_id]).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: i32, person_id: i32) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .store
            .find_vehicle(id)
            .await?
            .ok_or_else(rules::vehicle_not_found)?;

        // Verificar que pertenece a la persona
        rules::ensure_ownership(&vehicle, person_id)?;

        Ok(vehicle.into())
    }

    pub async fn delete(&self, id: i32, person_id: i32) -> Result<(), AppError> {
        self.store
            .delete_vehicle(id, person_id)
            .await
            .map_err(|e| e.on_persistence(rules::ERROR_DELETING_VEHICLE))?;
        info!("🗑️ Vehículo {} eliminado de persona {}", id, person_id);
        Ok(())
    }
}
