use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Vehicle, VehicleColor, VehicleModel};

// Request para añadir un vehículo a una persona.
// Los campos se validan en las reglas de negocio para mantener el orden de los errores.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateVehicleRequest {
    pub name: Option<String>,
    #[schema(example = "yellow")]
    pub color: Option<String>,
    #[schema(example = "hatch")]
    pub model: Option<String>,
}

// Response de vehículo
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleResponse {
    pub id: i32,
    pub name: String,
    pub color: VehicleColor,
    pub model: VehicleModel,
    pub person_id: i32,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            color: vehicle.color,
            model: vehicle.model,
            person_id: vehicle.person_id,
        }
    }
}
