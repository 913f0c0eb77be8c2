use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::dto::auth_dto::{CredentialsRequest, LoginResponse, UserResponse};
use crate::dto::person_dto::{CreatePersonRequest, PersonResponse, UpdatePersonRequest};
use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleResponse};
use crate::models::{VehicleColor, VehicleModel};
use crate::routes::{auth_routes, person_routes, vehicle_routes};
use crate::state::AppState;
use crate::utils::errors::ErrorResponse;

/// Documento OpenAPI de la API
#[derive(OpenApi)]
#[openapi(
    info(title = "Car Management API", version = "v1"),
    paths(
        auth_routes::register,
        auth_routes::login,
        person_routes::list_people,
        person_routes::create_person,
        person_routes::get_person,
        person_routes::update_person,
        person_routes::delete_person,
        vehicle_routes::list_person_vehicles,
        vehicle_routes::add_vehicle,
        vehicle_routes::get_vehicle,
        vehicle_routes::delete_vehicle,
    ),
    components(schemas(
        CredentialsRequest,
        UserResponse,
        LoginResponse,
        CreatePersonRequest,
        UpdatePersonRequest,
        PersonResponse,
        CreateVehicleRequest,
        VehicleResponse,
        VehicleColor,
        VehicleModel,
        ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "people", description = "People management"),
        (name = "vehicles", description = "Vehicles owned by people")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Rutas públicas de documentación y health check
pub fn create_docs_router() -> Router<AppState> {
    Router::new()
        .route("/openapi.json", get(openapi_json))
        .route("/health", get(health))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Endpoint de health check
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "car-management-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
