use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::dto::vehicle_dto::VehicleResponse;
use crate::models::{Person, Vehicle};

/// Límite máximo de filas por página
pub const MAX_PAGE_SIZE: i64 = 1000;

// Request para crear una persona
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePersonRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    pub sale_oportunity: Option<bool>,
}

// Request para editar una persona; los campos ausentes no se tocan
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePersonRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub sale_oportunity: Option<bool>,
}

/// Paginación opcional del listado de personas
#[derive(Debug, Default, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPeopleQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListPeopleQuery {
    /// Normaliza los valores: límite en 1..=MAX_PAGE_SIZE, offset no negativo
    pub fn normalized(self) -> (Option<i64>, i64) {
        (
            self.limit.map(|l| l.clamp(1, MAX_PAGE_SIZE)),
            self.offset.unwrap_or(0).max(0),
        )
    }
}

// Response de persona con sus vehículos
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PersonResponse {
    pub id: i32,
    pub name: String,
    pub sale_oportunity: bool,
    pub vehicles: Vec<VehicleResponse>,
}

impl PersonResponse {
    pub fn new(person: Person, vehicles: Vec<Vehicle>) -> Self {
        Self {
            id: person.id,
            name: person.name,
            sale_oportunity: person.sale_oportunity,
            vehicles: vehicles.into_iter().map(VehicleResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_is_clamped() {
        let query = ListPeopleQuery { limit: Some(5000), offset: Some(-3) };
        assert_eq!(query.normalized(), (Some(MAX_PAGE_SIZE), 0));

        let query = ListPeopleQuery { limit: Some(0), offset: None };
        assert_eq!(query.normalized(), (Some(1), 0));

        assert_eq!(ListPeopleQuery::default().normalized(), (None, 0));
    }

    #[test]
    fn test_update_request_distinguishes_false_from_absent() {
        let explicit: UpdatePersonRequest = serde_json::from_str(r#"{"sale_oportunity": false}"#).unwrap();
        assert_eq!(explicit.sale_oportunity, Some(false));

        let absent: UpdatePersonRequest = serde_json::from_str(r#"{"name": "Ann"}"#).unwrap();
        assert_eq!(absent.sale_oportunity, None);
    }
}
